//! Key validation
//!
//! Independent cross-check of a candidate key: sum the histogram energy on
//! the key's 7 scale degrees and compare it to a threshold. The validator
//! audits whatever key it is handed (the correlation estimator's output or an
//! external guess); it never recomputes the key itself.

use super::{KeyStatus, KeyValidation};
use crate::analysis::result::Key;
use crate::features::round_decimals;

/// Audit a candidate key against a normalized pitch-class histogram
///
/// # Arguments
///
/// * `histogram` - Normalized 12-bin pitch-class histogram
/// * `key` - Candidate key to audit
/// * `min_in_scale_energy` - Energy required for VALID (0.6 by default)
///
/// # Returns
///
/// The in-scale energy as confidence, with status `Valid` iff it clears the
/// threshold, `Weak` otherwise
pub fn validate_key(histogram: &[f32; 12], key: Key, min_in_scale_energy: f32) -> KeyValidation {
    let in_scale_energy = scale_energy(histogram, key);
    let out_of_scale_energy = 1.0 - in_scale_energy;
    let confidence = round_decimals(in_scale_energy, 3);

    let status = if confidence >= min_in_scale_energy {
        KeyStatus::Valid
    } else {
        log::warn!(
            "Key {} is weak: in-scale energy {:.3} below {:.2}",
            key.name(),
            in_scale_energy,
            min_in_scale_energy
        );
        KeyStatus::Weak
    };

    KeyValidation {
        key,
        confidence,
        in_scale_energy: round_decimals(in_scale_energy, 3),
        out_of_scale_energy: round_decimals(out_of_scale_energy, 3),
        status,
    }
}

/// The key whose scale captures the most histogram energy
///
/// Fallback guess for when the correlation estimator abstains. Scans majors
/// at tonic 0..11, then minors, updating on strict improvement, so the scan
/// order breaks exact ties deterministically.
pub fn best_key_by_scale_energy(histogram: &[f32; 12]) -> Key {
    let mut best_key = Key::Major(0);
    let mut best_energy = -1.0f32;

    for tonic in 0..12 {
        let key = Key::Major(tonic);
        let energy = scale_energy(histogram, key);
        if energy > best_energy {
            best_energy = energy;
            best_key = key;
        }
    }
    for tonic in 0..12 {
        let key = Key::Minor(tonic);
        let energy = scale_energy(histogram, key);
        if energy > best_energy {
            best_energy = energy;
            best_key = key;
        }
    }

    best_key
}

fn scale_energy(histogram: &[f32; 12], key: Key) -> f32 {
    key.scale_pitch_classes()
        .iter()
        .map(|&pc| histogram[pc as usize])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Normalized histogram with equal mass on the given pitch classes
    fn histogram_on(pcs: &[usize]) -> [f32; 12] {
        let mut h = [0.0f32; 12];
        for &pc in pcs {
            h[pc] = 1.0 / pcs.len() as f32;
        }
        h
    }

    #[test]
    fn test_pure_scale_is_fully_valid() {
        // All mass on C-major scale degrees
        let h = histogram_on(&[0, 2, 4, 5, 7, 9, 11]);
        let validation = validate_key(&h, Key::Major(0), 0.6);

        assert!((validation.in_scale_energy - 1.0).abs() < 1e-4);
        assert!(validation.out_of_scale_energy.abs() < 1e-4);
        assert_eq!(validation.status, KeyStatus::Valid);
        assert_eq!(validation.key, Key::Major(0));
    }

    #[test]
    fn test_chromatic_histogram_is_weak() {
        // Uniform mass: any 7-degree scale captures 7/12 ~ 0.583 < 0.6
        let h = [1.0f32 / 12.0; 12];
        let validation = validate_key(&h, Key::Major(0), 0.6);
        assert_eq!(validation.status, KeyStatus::Weak);
        assert!((validation.in_scale_energy - 7.0 / 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrong_key_scores_low() {
        // C-major mass audited as C# major: only the shared pitch classes
        // {0(B#)... } contribute; energy drops well below threshold
        let h = histogram_on(&[0, 2, 4, 5, 7, 9, 11]);
        let validation = validate_key(&h, Key::Major(1), 0.6);
        assert!(validation.in_scale_energy < 0.5);
        assert_eq!(validation.status, KeyStatus::Weak);
    }

    #[test]
    fn test_validator_audits_supplied_key_only() {
        // A-minor mass audited as E minor keeps the supplied key in the
        // report even though another key would score higher
        let h = histogram_on(&[9, 11, 0, 2, 4, 5, 7]);
        let validation = validate_key(&h, Key::Minor(4), 0.6);
        assert_eq!(validation.key, Key::Minor(4));
    }

    #[test]
    fn test_best_key_by_scale_energy_prefers_matching_scale() {
        let h = histogram_on(&[0, 2, 4, 5, 7, 9, 11]);
        // C major and A minor tie at full energy; majors are scanned first
        assert_eq!(best_key_by_scale_energy(&h), Key::Major(0));
    }

    #[test]
    fn test_validation_threshold_boundary() {
        // Exactly 0.6 in scale: VALID (>=, not >)
        let mut h = [0.0f32; 12];
        h[0] = 0.6; // tonic
        h[1] = 0.4; // out of scale
        let validation = validate_key(&h, Key::Major(0), 0.6);
        assert_eq!(validation.status, KeyStatus::Valid);

        h[0] = 0.55;
        h[1] = 0.45;
        let validation = validate_key(&h, Key::Major(0), 0.6);
        assert_eq!(validation.status, KeyStatus::Weak);
    }
}
