//! Note-based tempo estimation
//!
//! Estimates tempo purely from note durations: the median duration is taken
//! as one beat. Works well on monophonic material where the beat-tracking
//! signal is thin (solo flute, voice) but needs enough notes to be trusted,
//! so the estimate carries a confidence derived from duration regularity and
//! note count.

use crate::analysis::result::NoteEvent;
use crate::features::round_decimals;
use serde::{Deserialize, Serialize};

/// Minimum number of usable note durations for an estimate
const MIN_NOTES: usize = 3;

/// Note count at which the count factor saturates
const FULL_CONFIDENCE_COUNT: f32 = 8.0;

/// Note-based tempo estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteTempoEstimate {
    /// Estimated tempo in BPM, `None` when too few usable durations remain
    pub tempo: Option<f32>,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Median note duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_note_duration: Option<f32>,

    /// Number of durations that survived noise filtering
    pub note_count: usize,

    /// Why no tempo was produced, when `tempo` is `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl NoteTempoEstimate {
    fn failed(note_count: usize, reason: &str) -> Self {
        Self {
            tempo: None,
            confidence: 0.0,
            median_note_duration: None,
            note_count,
            reason: Some(reason.to_string()),
        }
    }
}

/// Estimate tempo from note durations
///
/// Requires at least 3 notes with positive duration; durations at or below
/// `min_duration` seconds are filtered as noise first. Tempo is
/// `60 / median(duration)`. Confidence is
/// `clamp01(regularity * count_factor)` where
/// `regularity = 1 - std/median` and `count_factor = min(1, count/8)`.
///
/// # Arguments
///
/// * `notes` - Segmented note events
/// * `min_duration` - Noise floor for durations in seconds (0.05 by default)
///
/// # Returns
///
/// An estimate that never fails hard: with too little data it reports
/// `tempo: None`, confidence 0.0, and a reason, and the selector falls back.
pub fn estimate_tempo_from_notes(notes: &[NoteEvent], min_duration: f32) -> NoteTempoEstimate {
    log::debug!("Estimating note-based tempo from {} notes", notes.len());

    if notes.len() < MIN_NOTES {
        return NoteTempoEstimate::failed(notes.len(), "Insufficient notes");
    }

    let mut durations: Vec<f32> = notes
        .iter()
        .map(NoteEvent::duration)
        .filter(|d| *d > min_duration)
        .collect();

    if durations.len() < MIN_NOTES {
        return NoteTempoEstimate::failed(durations.len(), "Unstable note durations");
    }

    durations.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = median_of_sorted(&durations);
    let tempo = 60.0 / median;

    let std = population_std(&durations);
    let regularity = 1.0 - std / median;
    let count_factor = (durations.len() as f32 / FULL_CONFIDENCE_COUNT).min(1.0);
    let confidence = (regularity * count_factor).clamp(0.0, 1.0);

    log::debug!(
        "Note-based tempo: {:.2} BPM (median={:.3}s, std={:.3}s, confidence={:.3})",
        tempo,
        median,
        std,
        confidence
    );

    NoteTempoEstimate {
        tempo: Some(round_decimals(tempo, 2)),
        confidence: round_decimals(confidence, 3),
        median_note_duration: Some(round_decimals(median, 3)),
        note_count: durations.len(),
        reason: None,
    }
}

fn median_of_sorted(sorted: &[f32]) -> f32 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn population_std(values: &[f32]) -> f32 {
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    variance.sqrt()
}
