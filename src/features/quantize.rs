//! Duration quantization
//!
//! Nearest-neighbor classification of note durations against the canonical
//! duration classes, with a rejection band: a note farther than the tolerance
//! from every class keeps its raw beat value and stays unclassified. Forcing
//! a snap outside tolerance would corrupt timing information silently.

use crate::analysis::result::{DurationClass, NoteEvent, QuantizedNote};
use crate::features::round_decimals;

/// Map note durations to canonical duration classes at the accepted tempo
///
/// `beats = duration_sec * tempo / 60`. The class with minimum absolute
/// error wins; classes are scanned longest first with a strict minimum
/// update, so an exact error tie goes to the longer class. A match requires
/// `error <= tolerance` (inclusive).
///
/// # Arguments
///
/// * `notes` - Segmented note events
/// * `tempo` - Accepted tempo in BPM (must come from an ACCEPTED decision)
/// * `tolerance` - Allowed snapping error in beats (0.3 by default)
///
/// # Example
///
/// ```
/// use monoscribe::analysis::result::{DurationClass, NoteEvent};
/// use monoscribe::features::quantize::quantize_notes;
///
/// let notes = vec![NoteEvent { start: 0.0, end: 0.5, pitch: 440.0 }];
/// let quantized = quantize_notes(&notes, 120.0, 0.3);
///
/// assert_eq!(quantized[0].duration, Some(DurationClass::Quarter));
/// assert_eq!(quantized[0].quantized_beats, 1.0);
/// ```
pub fn quantize_notes(notes: &[NoteEvent], tempo: f32, tolerance: f32) -> Vec<QuantizedNote> {
    log::debug!(
        "Quantizing {} notes at {:.2} BPM (tolerance {} beats)",
        notes.len(),
        tempo,
        tolerance
    );

    notes
        .iter()
        .map(|note| {
            let beats = note.duration() * tempo / 60.0;

            let mut class = DurationClass::Whole;
            let mut error = (beats - class.beats()).abs();
            for candidate in &DurationClass::ALL[1..] {
                let candidate_error = (beats - candidate.beats()).abs();
                if candidate_error < error {
                    class = *candidate;
                    error = candidate_error;
                }
            }

            let (duration, quantized_beats) = if error <= tolerance {
                (Some(class), class.beats())
            } else {
                (None, round_decimals(beats, 2))
            };

            QuantizedNote {
                start: note.start,
                end: note.end,
                pitch: note.pitch,
                duration_beats: round_decimals(beats, 2),
                quantized_beats,
                duration,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(duration_sec: f32) -> NoteEvent {
        NoteEvent {
            start: 1.0,
            end: 1.0 + duration_sec,
            pitch: 440.0,
        }
    }

    fn quantize_one(duration_sec: f32, tempo: f32) -> QuantizedNote {
        quantize_notes(&[note(duration_sec)], tempo, 0.3)[0]
    }

    #[test]
    fn test_exact_canonical_values_match_with_zero_error() {
        // At 120 BPM one beat is 0.5s
        for class in DurationClass::ALL {
            let q = quantize_one(class.beats() * 0.5, 120.0);
            assert_eq!(q.duration, Some(class), "class {:?}", class);
            assert_eq!(q.quantized_beats, class.beats());
            assert_eq!(q.duration_beats, class.beats());
        }
    }

    #[test]
    fn test_near_values_snap() {
        // 0.55s at 120 BPM = 1.1 beats -> quarter
        let q = quantize_one(0.55, 120.0);
        assert_eq!(q.duration, Some(DurationClass::Quarter));
        assert_eq!(q.quantized_beats, 1.0);
        assert_eq!(q.duration_beats, 1.1);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        // 2.25 beats is exactly tolerance (0.25) from the half note; the
        // values here are exactly representable, so the comparison is exact
        let q = quantize_notes(&[note(1.125)], 120.0, 0.25)[0];
        assert_eq!(q.duration, Some(DurationClass::Half));
        assert_eq!(q.quantized_beats, 2.0);

        // Strictly beyond tolerance: unknown
        let q = quantize_notes(&[note(1.140625)], 120.0, 0.25)[0];
        assert_eq!(q.duration, None);
    }

    #[test]
    fn test_beyond_tolerance_is_unknown() {
        // 3.35 beats: 0.35 from dotted half, 0.65 from whole
        let q = quantize_one(1.675, 120.0);
        assert_eq!(q.duration, None);
        assert_eq!(q.quantized_beats, 3.35);
        assert_eq!(q.duration_beats, 3.35);
    }

    #[test]
    fn test_far_outlier_keeps_raw_beats() {
        // 6 beats is nowhere near any class
        let q = quantize_one(3.0, 120.0);
        assert_eq!(q.duration, None);
        assert_eq!(q.quantized_beats, 6.0);
    }

    #[test]
    fn test_error_tie_prefers_longer_class() {
        // 3.5 beats is 0.5 from both whole and dotted half; outside the
        // default tolerance, but with tolerance 0.5 the longer class wins
        let q = quantize_notes(&[note(1.75)], 120.0, 0.5)[0];
        assert_eq!(q.duration, Some(DurationClass::Whole));
        assert_eq!(q.quantized_beats, 4.0);
    }

    #[test]
    fn test_original_times_and_pitch_are_preserved() {
        let input = NoteEvent {
            start: 0.25,
            end: 0.75,
            pitch: 329.63,
        };
        let q = quantize_notes(&[input], 120.0, 0.3)[0];
        assert_eq!(q.start, input.start);
        assert_eq!(q.end, input.end);
        assert_eq!(q.pitch, input.pitch);
    }

    #[test]
    fn test_empty_input() {
        assert!(quantize_notes(&[], 120.0, 0.3).is_empty());
    }
}
