//! Beat-based tempo estimation
//!
//! Wraps the output of an external onset-strength/beat-tracking routine.
//! Beat tracking itself is out of scope here; this stage normalizes the
//! tracker's tempo and beat timestamps and derives interval diagnostics
//! (mean/std) the selector and callers can inspect.

use crate::features::round_decimals;
use serde::{Deserialize, Serialize};

/// Raw output of an external beat-tracking routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatTrack {
    /// Tracker's tempo estimate in BPM
    pub tempo: f32,

    /// Beat timestamps in seconds, ascending
    pub beats: Vec<f32>,
}

/// Beat-based tempo estimate with interval diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatTempoEstimate {
    /// Estimated tempo in BPM, `None` when no beat track was supplied or the
    /// tracker's tempo is unusable
    pub tempo: Option<f32>,

    /// Number of tracked beats
    pub beat_count: usize,

    /// Mean inter-beat interval in seconds (needs >= 2 beats)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_beat_interval: Option<f32>,

    /// Inter-beat interval standard deviation in seconds (needs >= 2 beats)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beat_interval_std: Option<f32>,
}

impl BeatTempoEstimate {
    /// Estimate representing a missing or failed beat-tracking stage
    pub fn absent() -> Self {
        Self {
            tempo: None,
            beat_count: 0,
            mean_beat_interval: None,
            beat_interval_std: None,
        }
    }
}

/// Derive a tempo estimate from an external beat track
///
/// Always produces a tempo when the tracker reported a positive, finite one,
/// even if inaccurate; the selector pins its confidence. Interval mean/std
/// are secondary diagnostics for callers auditing grid stability.
///
/// # Arguments
///
/// * `track` - Beat-tracker output, or `None` when the stage was skipped
pub fn estimate_tempo_from_beats(track: Option<&BeatTrack>) -> BeatTempoEstimate {
    let Some(track) = track else {
        log::debug!("No beat track supplied; beat-based tempo absent");
        return BeatTempoEstimate::absent();
    };

    log::debug!(
        "Deriving beat-based tempo from {} beats (tracker tempo {:.2})",
        track.beats.len(),
        track.tempo
    );

    let tempo = if track.tempo.is_finite() && track.tempo > 0.0 {
        Some(round_decimals(track.tempo, 2))
    } else {
        None
    };

    let intervals: Vec<f32> = track.beats.windows(2).map(|w| w[1] - w[0]).collect();
    let (mean, std) = if intervals.is_empty() {
        (None, None)
    } else {
        let n = intervals.len() as f32;
        let mean = intervals.iter().sum::<f32>() / n;
        let variance = intervals.iter().map(|i| (i - mean).powi(2)).sum::<f32>() / n;
        (Some(mean), Some(variance.sqrt()))
    };

    BeatTempoEstimate {
        tempo,
        beat_count: track.beats.len(),
        mean_beat_interval: mean,
        beat_interval_std: std,
    }
}
