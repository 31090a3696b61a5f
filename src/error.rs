//! Error types for the transcription engine

use std::fmt;

/// Errors that can occur during transcription
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionError {
    /// Invalid input parameters (malformed frames, unknown labels, etc.)
    InvalidInput(String),

    /// Too few notes or frames for a stage to produce a meaningful result
    InsufficientData(String),

    /// The selected tempo failed the acceptance audit; quantization must not
    /// proceed on it
    TempoRejected {
        /// Tempo that was selected before rejection (BPM)
        tempo: f32,
        /// Confidence that fell below the acceptance threshold
        confidence: f32,
    },

    /// Numerical error (non-finite values, degenerate statistics)
    NumericalError(String),

    /// An external collaborator (pitch tracker, separator, classifier)
    /// failed or returned empty output
    UpstreamFailure(String),
}

impl fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TranscriptionError::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
            TranscriptionError::TempoRejected { tempo, confidence } => write!(
                f,
                "Tempo rejected: {:.2} BPM at confidence {:.3} (below acceptance threshold)",
                tempo, confidence
            ),
            TranscriptionError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            TranscriptionError::UpstreamFailure(msg) => write!(f, "Upstream failure: {}", msg),
        }
    }
}

impl std::error::Error for TranscriptionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TranscriptionError::InvalidInput("frame times not increasing".to_string());
        assert_eq!(err.to_string(), "Invalid input: frame times not increasing");

        let err = TranscriptionError::TempoRejected {
            tempo: 120.0,
            confidence: 0.3,
        };
        assert!(err.to_string().contains("120.00 BPM"));
        assert!(err.to_string().contains("0.300"));
    }
}
