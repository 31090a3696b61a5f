//! Note segmentation
//!
//! Converts a pitch-confidence frame stream into discrete note events with a
//! two-state machine (silent / voiced). A frame is voiced when its confidence
//! clears the threshold, a frequency is present, and the frequency lies in
//! the instrument's admissible range. Pitch jumps beyond the configured
//! threshold open a new note; smaller deviations are absorbed by an
//! exponentially smoothed running pitch so vibrato and tracker jitter do not
//! fragment a held note.

use crate::analysis::result::NoteEvent;
use crate::config::TranscriptionConfig;
use crate::features::round_decimals;
use crate::instruments::Instrument;
use crate::io::frames::PitchFrame;

/// Weight of the previous running pitch in the exponential smoother
const PITCH_SMOOTHING: f32 = 0.9;

/// Segmentation output with voicing diagnostics
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Emitted note events in time order
    pub notes: Vec<NoteEvent>,

    /// Number of frames that passed the voicing gate
    pub voiced_frame_count: usize,
}

/// State of the segmentation machine: the currently open note, if any
struct OpenNote {
    start: f32,
    pitch: f32,
}

/// Segment a frame sequence into note events
///
/// # Arguments
///
/// * `frames` - Normalized pitch frames, ordered by strictly increasing time
/// * `instrument` - Optional instrument bounding the admissible pitch range
/// * `config` - Thresholds: voicing confidence, pitch jump, minimum duration
///
/// # Returns
///
/// Note events in time order. Every emitted note satisfies `end > start`,
/// `pitch > 0`, and duration >= `config.min_note_duration`; segments shorter
/// than the minimum are dropped silently. An empty frame sequence yields an
/// empty note list.
///
/// Output times are rounded to 3 decimals and pitches to 2 for determinism.
///
/// # Example
///
/// ```
/// use monoscribe::config::TranscriptionConfig;
/// use monoscribe::features::segmentation::segment_notes;
/// use monoscribe::io::frames::PitchFrame;
///
/// let frames: Vec<PitchFrame> = (0..20)
///     .map(|i| PitchFrame {
///         time: i as f32 * 0.01,
///         frequency: Some(440.0),
///         confidence: 0.9,
///     })
///     .collect();
///
/// let segmentation = segment_notes(&frames, None, &TranscriptionConfig::default());
/// assert_eq!(segmentation.notes.len(), 1);
/// ```
pub fn segment_notes(
    frames: &[PitchFrame],
    instrument: Option<Instrument>,
    config: &TranscriptionConfig,
) -> Segmentation {
    log::debug!(
        "Segmenting {} frames (instrument={:?}, conf_thresh={}, jump={}Hz, min_dur={}s)",
        frames.len(),
        instrument,
        config.confidence_threshold,
        config.pitch_jump_hz,
        config.min_note_duration
    );

    let mut notes = Vec::new();
    let mut voiced_frame_count = 0usize;
    let mut open: Option<OpenNote> = None;

    for frame in frames {
        let voiced_freq = voiced_frequency(frame, instrument, config.confidence_threshold);

        let Some(freq) = voiced_freq else {
            // VOICED -> SILENT: close the current note at this frame's time
            if let Some(note) = open.take() {
                push_if_long_enough(&mut notes, &note, frame.time, config.min_note_duration);
            }
            continue;
        };

        voiced_frame_count += 1;

        match open {
            // SILENT -> VOICED: open a new note
            None => {
                open = Some(OpenNote {
                    start: frame.time,
                    pitch: freq,
                });
            }
            Some(ref mut note) => {
                if (freq - note.pitch).abs() > config.pitch_jump_hz {
                    // New note boundary: close here, reopen at this frame
                    push_if_long_enough(&mut notes, note, frame.time, config.min_note_duration);
                    note.start = frame.time;
                    note.pitch = freq;
                } else {
                    note.pitch = PITCH_SMOOTHING * note.pitch + (1.0 - PITCH_SMOOTHING) * freq;
                }
            }
        }
    }

    // End of stream: close the final note at the last frame's time
    if let (Some(note), Some(last)) = (open, frames.last()) {
        push_if_long_enough(&mut notes, &note, last.time, config.min_note_duration);
    }

    log::debug!(
        "Segmented {} notes from {} voiced frames",
        notes.len(),
        voiced_frame_count
    );

    Segmentation {
        notes,
        voiced_frame_count,
    }
}

/// The frame's frequency if the frame is voiced, `None` otherwise
fn voiced_frequency(
    frame: &PitchFrame,
    instrument: Option<Instrument>,
    confidence_threshold: f32,
) -> Option<f32> {
    if frame.confidence < confidence_threshold {
        return None;
    }
    let freq = frame.frequency?;
    if let Some(instrument) = instrument {
        if !instrument.contains(freq) {
            return None;
        }
    }
    Some(freq)
}

fn push_if_long_enough(
    notes: &mut Vec<NoteEvent>,
    note: &OpenNote,
    end: f32,
    min_note_duration: f32,
) {
    if end - note.start >= min_note_duration {
        notes.push(NoteEvent {
            start: round_decimals(note.start, 3),
            end: round_decimals(end, 3),
            pitch: round_decimals(note.pitch, 2),
        });
    }
}
