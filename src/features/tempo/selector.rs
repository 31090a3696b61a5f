//! Tempo selection and acceptance audit
//!
//! Fuses the two estimates with a deterministic priority policy, not a vote:
//! the note-based estimate wins when it is confident enough, the beat-based
//! estimate is the fallback at a pinned confidence, and 120 BPM is the
//! absolute fallback. A separate audit labels the decision ACCEPTED or
//! REJECTED; quantization must not proceed on a rejected tempo.

use super::beat_based::BeatTempoEstimate;
use super::note_based::NoteTempoEstimate;
use serde::{Deserialize, Serialize};

/// Confidence pinned on an accepted beat-based estimate
const BEAT_BASED_CONFIDENCE: f32 = 0.6;

/// Tempo and confidence of the absolute fallback
const DEFAULT_TEMPO: f32 = 120.0;
const DEFAULT_CONFIDENCE: f32 = 0.3;

/// Provenance of the selected tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoSource {
    /// Note-duration median estimate
    NoteBased,
    /// External beat-tracking estimate
    BeatBased,
    /// Absolute fallback (120 BPM)
    Default,
}

/// The accepted tempo with provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedTempo {
    /// Tempo in BPM
    pub tempo: f32,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Which estimator produced the tempo
    pub source: TempoSource,
}

/// Acceptance decision on the selected tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TempoDecision {
    /// Confidence cleared the acceptance threshold
    Accepted,
    /// Confidence too low; downstream quantization is blocked
    Rejected,
}

/// Select the final tempo from the two estimates
///
/// Priority policy:
/// 1. Note-based estimate, if present with confidence >= `note_preference`
/// 2. Beat-based estimate, if present, with confidence pinned to 0.6
/// 3. Fallback: 120.0 BPM at confidence 0.3
///
/// # Arguments
///
/// * `beat` - Beat-based estimate (external beat tracker)
/// * `note` - Note-based estimate (duration median)
/// * `note_preference` - Note-based confidence required to win (0.6 default)
pub fn select_tempo(
    beat: &BeatTempoEstimate,
    note: &NoteTempoEstimate,
    note_preference: f32,
) -> SelectedTempo {
    if let Some(tempo) = note.tempo {
        if note.confidence >= note_preference {
            log::debug!(
                "Selected note-based tempo {:.2} BPM (confidence {:.3})",
                tempo,
                note.confidence
            );
            return SelectedTempo {
                tempo,
                confidence: note.confidence,
                source: TempoSource::NoteBased,
            };
        }
    }

    if let Some(tempo) = beat.tempo {
        log::debug!("Selected beat-based tempo {:.2} BPM", tempo);
        return SelectedTempo {
            tempo,
            confidence: BEAT_BASED_CONFIDENCE,
            source: TempoSource::BeatBased,
        };
    }

    log::warn!("No usable tempo estimate; falling back to {} BPM", DEFAULT_TEMPO);
    SelectedTempo {
        tempo: DEFAULT_TEMPO,
        confidence: DEFAULT_CONFIDENCE,
        source: TempoSource::Default,
    }
}

/// Audit the selected tempo against the acceptance threshold
///
/// `Accepted` iff confidence >= `min_confidence` (0.5 default). A `Rejected`
/// decision is a blocking condition for quantization and must be surfaced to
/// the caller, not silently bypassed.
pub fn validate_tempo(selected: &SelectedTempo, min_confidence: f32) -> TempoDecision {
    if selected.confidence >= min_confidence {
        TempoDecision::Accepted
    } else {
        log::warn!(
            "Tempo {:.2} BPM rejected: confidence {:.3} below {:.2}",
            selected.tempo,
            selected.confidence,
            min_confidence
        );
        TempoDecision::Rejected
    }
}
