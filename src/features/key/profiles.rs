//! Krumhansl-Kessler tonal profiles
//!
//! Reference pitch-class weight vectors for the major and minor modes,
//! rotated to each of the 12 tonics during the template scan.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in
//! Perceived Tonal Organization in a Spatial Representation of Musical Keys.
//! *Psychological Review*, 89(4), 334-368.

/// Tonal profiles for the two modes
#[derive(Debug, Clone)]
pub struct KeyProfiles {
    /// Major profile, tonic at index 0 (C major)
    pub major: [f32; 12],

    /// Minor profile, tonic at index 0 (C minor)
    pub minor: [f32; 12],
}

impl KeyProfiles {
    /// The Krumhansl-Kessler probe-tone rating profiles
    pub fn new() -> Self {
        Self {
            major: [
                6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
            ],
            minor: [
                6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
            ],
        }
    }

    /// Major profile rotated so the tonic sits at pitch class `tonic`
    pub fn major_rotation(&self, tonic: usize) -> [f32; 12] {
        rotate(&self.major, tonic)
    }

    /// Minor profile rotated so the tonic sits at pitch class `tonic`
    pub fn minor_rotation(&self, tonic: usize) -> [f32; 12] {
        rotate(&self.minor, tonic)
    }
}

impl Default for KeyProfiles {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotate a profile right by `by` positions (tonic weight moves to index `by`)
fn rotate(profile: &[f32; 12], by: usize) -> [f32; 12] {
    let mut rotated = [0.0f32; 12];
    for (i, r) in rotated.iter_mut().enumerate() {
        *r = profile[(i + 12 - (by % 12)) % 12];
    }
    rotated
}
