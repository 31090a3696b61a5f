//! Core transcription stages
//!
//! This module contains the symbolic pipeline stages:
//! - Note segmentation (frame stream -> note events)
//! - Tempo estimation (note-based + beat-based, with selection)
//! - Duration quantization
//! - Key estimation and validation
//! - Key-aware note naming

pub mod key;
pub mod naming;
pub mod quantize;
pub mod segmentation;
pub mod tempo;

/// Round to a fixed number of decimal places.
///
/// Output times, pitches, and confidences carry fixed precision so repeated
/// runs on the same input are bit-identical.
pub(crate) fn round_decimals(value: f32, places: u32) -> f32 {
    let scale = 10f32.powi(places as i32);
    (value * scale).round() / scale
}
