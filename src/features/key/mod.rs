//! Key estimation and validation modules
//!
//! Estimate the musical key from pitch-class energy:
//! - Krumhansl-Kessler tonal profiles (12 major + 12 minor rotations)
//! - Pearson-correlation template scan
//! - Independent in-scale-energy audit of a candidate key

pub mod estimator;
pub mod profiles;
pub mod validator;

pub use estimator::{estimate_key, estimate_key_from_histogram, pitch_class_histogram};
pub use profiles::KeyProfiles;
pub use validator::{best_key_by_scale_energy, validate_key};

use crate::analysis::result::Key;
use serde::{Deserialize, Serialize};

/// Estimated key with correlation confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Best-matching key
    pub key: Key,

    /// Pearson correlation of the winning profile rotation
    pub confidence: f32,
}

/// Key validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyStatus {
    /// In-scale energy cleared the threshold
    Valid,
    /// In-scale energy too low; the key is doubtful
    Weak,
}

/// Result of auditing a candidate key against a pitch-class histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyValidation {
    /// The audited key (supplied, never recomputed)
    pub key: Key,

    /// In-scale energy, reported as the audit confidence
    pub confidence: f32,

    /// Histogram energy on the key's 7 scale degrees
    pub in_scale_energy: f32,

    /// Histogram energy outside the scale
    pub out_of_scale_energy: f32,

    /// VALID or WEAK
    pub status: KeyStatus,
}
