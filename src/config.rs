//! Configuration parameters for transcription

/// Transcription configuration parameters
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    // Segmentation
    /// Minimum frame confidence for a frame to count as voiced (default: 0.6)
    pub confidence_threshold: f32,

    /// Pitch jump in Hz that starts a new note (default: 50.0)
    /// Jumps at or below this are absorbed by the running-pitch smoother
    pub pitch_jump_hz: f32,

    /// Minimum note duration in seconds (default: 0.08)
    /// Shorter segments are dropped silently
    pub min_note_duration: f32,

    // Tempo estimation
    /// Note durations at or below this are discarded as noise before
    /// note-based tempo estimation, in seconds (default: 0.05)
    pub min_tempo_duration: f32,

    /// Note-based tempo confidence required to win over the beat-based
    /// estimate (default: 0.6)
    pub note_tempo_preference: f32,

    /// Selected-tempo confidence required for the ACCEPTED decision
    /// (default: 0.5)
    pub min_tempo_confidence: f32,

    // Quantization
    /// Allowed snapping error in beats (default: 0.3)
    /// Notes farther than this from every canonical class stay unquantized
    pub quantize_tolerance: f32,

    // Key validation
    /// In-scale energy required for the VALID status (default: 0.6)
    pub min_in_scale_energy: f32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            pitch_jump_hz: 50.0,
            min_note_duration: 0.08,
            min_tempo_duration: 0.05,
            note_tempo_preference: 0.6,
            min_tempo_confidence: 0.5,
            quantize_tolerance: 0.3,
            min_in_scale_energy: 0.6,
        }
    }
}
