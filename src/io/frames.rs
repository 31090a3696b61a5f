//! Pitch frame type and stream adapter
//!
//! The engine consumes (time, frequency, confidence) frames from an external
//! fundamental-frequency tracker. The adapter here normalizes that stream so
//! every downstream stage can assume finite values, clamped confidence, and
//! strictly increasing time.

use crate::error::TranscriptionError;
use serde::{Deserialize, Serialize};

/// One time-stamped pitch/confidence sample from a pitch tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Frame time in seconds
    pub time: f32,

    /// Estimated fundamental frequency in Hz, `None` when the tracker
    /// produced no usable estimate
    pub frequency: Option<f32>,

    /// Tracker confidence (0.0-1.0)
    pub confidence: f32,
}

/// Normalize an externally supplied frame sequence
///
/// - Non-finite or non-positive frequencies become `None`
/// - Non-finite confidence becomes 0.0; finite values are clamped to [0, 1]
/// - Non-finite or non-monotonic times are rejected
///
/// # Arguments
///
/// * `frames` - Raw frames as produced by a pitch tracker
///
/// # Returns
///
/// A cleaned frame sequence with the same length and order
///
/// # Errors
///
/// Returns `InvalidInput` if any frame time is non-finite or not strictly
/// greater than its predecessor's
pub fn normalize_frames(frames: &[PitchFrame]) -> Result<Vec<PitchFrame>, TranscriptionError> {
    log::debug!("Normalizing {} pitch frames", frames.len());

    let mut normalized = Vec::with_capacity(frames.len());
    let mut prev_time: Option<f32> = None;

    for (i, frame) in frames.iter().enumerate() {
        if !frame.time.is_finite() {
            return Err(TranscriptionError::InvalidInput(format!(
                "Frame {} has non-finite time",
                i
            )));
        }
        if let Some(prev) = prev_time {
            if frame.time <= prev {
                return Err(TranscriptionError::InvalidInput(format!(
                    "Frame times must be strictly increasing: frame {} at {:.3}s follows {:.3}s",
                    i, frame.time, prev
                )));
            }
        }
        prev_time = Some(frame.time);

        let frequency = frame
            .frequency
            .filter(|f| f.is_finite() && *f > 0.0);

        let confidence = if frame.confidence.is_finite() {
            frame.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        normalized.push(PitchFrame {
            time: frame.time,
            frequency,
            confidence,
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(time: f32, frequency: Option<f32>, confidence: f32) -> PitchFrame {
        PitchFrame {
            time,
            frequency,
            confidence,
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_frames(&[]).unwrap(), vec![]);
    }

    #[test]
    fn test_normalize_passes_clean_frames_through() {
        let frames = vec![
            frame(0.0, Some(440.0), 0.9),
            frame(0.01, Some(441.0), 0.8),
        ];
        assert_eq!(normalize_frames(&frames).unwrap(), frames);
    }

    #[test]
    fn test_normalize_drops_bad_frequencies() {
        let frames = vec![
            frame(0.0, Some(f32::NAN), 0.9),
            frame(0.01, Some(-5.0), 0.9),
            frame(0.02, Some(0.0), 0.9),
        ];
        let cleaned = normalize_frames(&frames).unwrap();
        assert!(cleaned.iter().all(|f| f.frequency.is_none()));
    }

    #[test]
    fn test_normalize_clamps_confidence() {
        let frames = vec![
            frame(0.0, Some(440.0), 1.5),
            frame(0.01, Some(440.0), -0.2),
            frame(0.02, Some(440.0), f32::NAN),
        ];
        let cleaned = normalize_frames(&frames).unwrap();
        assert_eq!(cleaned[0].confidence, 1.0);
        assert_eq!(cleaned[1].confidence, 0.0);
        assert_eq!(cleaned[2].confidence, 0.0);
    }

    #[test]
    fn test_normalize_rejects_non_monotonic_time() {
        let frames = vec![frame(0.0, Some(440.0), 0.9), frame(0.0, Some(440.0), 0.9)];
        let err = normalize_frames(&frames).unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidInput(_)));
    }
}
