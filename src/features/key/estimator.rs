//! Correlation-based key estimation
//!
//! Builds a duration-weighted 12-bin pitch-class histogram from the note
//! sequence and correlates it (Pearson) against the 24 rotated
//! Krumhansl-Kessler profiles. The scan runs tonic 0..11 with major evaluated
//! before minor at each tonic, updating on a strict improvement only; this
//! fixed order makes tie-breaking deterministic across runs.

use super::profiles::KeyProfiles;
use super::KeyEstimate;
use crate::analysis::result::{Key, NoteEvent};
use crate::features::round_decimals;

/// Guard against zero-variance degenerate correlations
const EPSILON: f32 = 1e-9;

/// Convert a frequency in Hz to a pitch class (0 = C, ..., 11 = B)
pub fn hz_to_pitch_class(freq: f32) -> u32 {
    let midi = (69.0 + 12.0 * (freq / 440.0).log2()).round() as i64;
    midi.rem_euclid(12) as u32
}

/// Build a normalized, duration-weighted pitch-class histogram
///
/// Each note contributes its duration in seconds to its pitch class's bin
/// (normalization cancels the tempo factor, so weighting by seconds and by
/// beats give the same histogram). Notes with non-positive pitch are
/// skipped. Returns `None` when no note contributes any mass.
pub fn pitch_class_histogram(notes: &[NoteEvent]) -> Option<[f32; 12]> {
    let mut histogram = [0.0f32; 12];

    for note in notes {
        if note.pitch <= 0.0 {
            continue;
        }
        let pc = hz_to_pitch_class(note.pitch) as usize;
        histogram[pc] += note.duration();
    }

    let total: f32 = histogram.iter().sum();
    if total <= EPSILON {
        return None;
    }
    for bin in histogram.iter_mut() {
        *bin /= total;
    }
    Some(histogram)
}

/// Estimate the musical key of a note sequence
///
/// # Arguments
///
/// * `notes` - Segmented note events (order does not matter)
/// * `profiles` - Krumhansl-Kessler reference profiles
///
/// # Returns
///
/// The key whose rotated profile correlates best with the histogram, with
/// that correlation as confidence (rounded to 3 decimals). `None` when no
/// usable pitches remain or every correlation is degenerate.
///
/// # Example
///
/// ```
/// use monoscribe::analysis::result::{Key, NoteEvent};
/// use monoscribe::features::key::{estimate_key, KeyProfiles};
///
/// // C major arpeggio: C4, E4, G4
/// let notes: Vec<NoteEvent> = [261.63, 329.63, 392.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &pitch)| NoteEvent {
///         start: i as f32 * 0.5,
///         end: (i + 1) as f32 * 0.5,
///         pitch,
///     })
///     .collect();
///
/// let estimate = estimate_key(&notes, &KeyProfiles::new()).unwrap();
/// assert_eq!(estimate.key, Key::Major(0));
/// ```
pub fn estimate_key(notes: &[NoteEvent], profiles: &KeyProfiles) -> Option<KeyEstimate> {
    log::debug!("Estimating key from {} notes", notes.len());

    let histogram = pitch_class_histogram(notes)?;
    estimate_key_from_histogram(&histogram, profiles)
}

/// Estimate the key directly from a pitch-class histogram
///
/// Scan order: tonic 0..11, major before minor at each tonic, strict `>`
/// update. The first maximum encountered wins on exact ties.
pub fn estimate_key_from_histogram(
    histogram: &[f32; 12],
    profiles: &KeyProfiles,
) -> Option<KeyEstimate> {
    let mut best: Option<(Key, f32)> = None;

    for tonic in 0..12u32 {
        let candidates = [
            (
                Key::Major(tonic),
                pearson(&profiles.major_rotation(tonic as usize), histogram),
            ),
            (
                Key::Minor(tonic),
                pearson(&profiles.minor_rotation(tonic as usize), histogram),
            ),
        ];
        for (key, score) in candidates {
            let Some(score) = score else { continue };
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((key, score));
            }
        }
    }

    let (key, score) = best?;
    log::debug!("Estimated key {} (correlation {:.3})", key.name(), score);
    Some(KeyEstimate {
        key,
        confidence: round_decimals(score, 3),
    })
}

/// Pearson correlation of two 12-bin vectors
///
/// `None` when either vector has (near-)zero variance; a degenerate
/// correlation is skipped rather than propagated as NaN.
fn pearson(a: &[f32; 12], b: &[f32; 12]) -> Option<f32> {
    let n = 12.0f32;
    let mean_a = a.iter().sum::<f32>() / n;
    let mean_b = b.iter().sum::<f32>() / n;

    let mut cov = 0.0f32;
    let mut var_a = 0.0f32;
    let mut var_b = 0.0f32;
    for i in 0..12 {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom <= EPSILON {
        return None;
    }
    Some(cov / denom)
}
