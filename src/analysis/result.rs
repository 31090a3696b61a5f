//! Transcription result types

use crate::features::key::{KeyEstimate, KeyValidation};
use crate::features::tempo::{SelectedTempo, TempoDecision};
use serde::{Deserialize, Serialize};

/// Musical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Key {
    /// Get key name in musical notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use monoscribe::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(0).name(), "C");
    /// assert_eq!(Key::Major(6).name(), "F#");
    /// assert_eq!(Key::Minor(9).name(), "Am");
    /// ```
    pub fn name(&self) -> String {
        let note_names = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        match self {
            Key::Major(i) => note_names[*i as usize % 12].to_string(),
            Key::Minor(i) => format!("{}m", note_names[*i as usize % 12]),
        }
    }

    /// Tonic pitch class (0 = C, ..., 11 = B)
    pub fn tonic(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => *i % 12,
        }
    }

    /// True for minor keys
    pub fn is_minor(&self) -> bool {
        matches!(self, Key::Minor(_))
    }

    /// The 7 scale-degree pitch classes of this key, in ascending order
    /// from the tonic (major scale or natural minor scale)
    pub fn scale_pitch_classes(&self) -> [u32; 7] {
        let intervals: [u32; 7] = match self {
            Key::Major(_) => [0, 2, 4, 5, 7, 9, 11],
            Key::Minor(_) => [0, 2, 3, 5, 7, 8, 10],
        };
        let tonic = self.tonic();
        let mut pcs = [0u32; 7];
        for (pc, interval) in pcs.iter_mut().zip(intervals.iter()) {
            *pc = (tonic + interval) % 12;
        }
        pcs
    }
}

/// Raw note event produced by the segmenter
///
/// Invariants: `end > start`, `pitch > 0`. The pitch is the smoothed
/// representative frequency of the segment, not any single frame's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Start time in seconds
    pub start: f32,

    /// End time in seconds
    pub end: f32,

    /// Representative frequency in Hz
    pub pitch: f32,
}

impl NoteEvent {
    /// Note duration in seconds
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

/// Canonical musical duration classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationClass {
    /// 4 beats
    Whole,
    /// 3 beats
    DottedHalf,
    /// 2 beats
    Half,
    /// 1.5 beats
    DottedQuarter,
    /// 1 beat
    Quarter,
    /// 0.75 beats
    DottedEighth,
    /// 0.5 beats
    Eighth,
    /// 0.25 beats
    Sixteenth,
}

impl DurationClass {
    /// All classes, longest first (scan order for nearest-class matching)
    pub const ALL: [DurationClass; 8] = [
        DurationClass::Whole,
        DurationClass::DottedHalf,
        DurationClass::Half,
        DurationClass::DottedQuarter,
        DurationClass::Quarter,
        DurationClass::DottedEighth,
        DurationClass::Eighth,
        DurationClass::Sixteenth,
    ];

    /// Canonical value in beats
    pub fn beats(&self) -> f32 {
        match self {
            DurationClass::Whole => 4.0,
            DurationClass::DottedHalf => 3.0,
            DurationClass::Half => 2.0,
            DurationClass::DottedQuarter => 1.5,
            DurationClass::Quarter => 1.0,
            DurationClass::DottedEighth => 0.75,
            DurationClass::Eighth => 0.5,
            DurationClass::Sixteenth => 0.25,
        }
    }

    /// Lowercase class name ("whole", "dotted_half", ...)
    pub fn name(&self) -> &'static str {
        match self {
            DurationClass::Whole => "whole",
            DurationClass::DottedHalf => "dotted_half",
            DurationClass::Half => "half",
            DurationClass::DottedQuarter => "dotted_quarter",
            DurationClass::Quarter => "quarter",
            DurationClass::DottedEighth => "dotted_eighth",
            DurationClass::Eighth => "eighth",
            DurationClass::Sixteenth => "sixteenth",
        }
    }
}

/// Note with quantized duration information
///
/// `duration` is `None` when no canonical class lies within the quantizer's
/// tolerance; in that case `quantized_beats` keeps the raw (rounded) beat
/// value rather than a corrupted snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizedNote {
    /// Start time in seconds
    pub start: f32,

    /// End time in seconds
    pub end: f32,

    /// Representative frequency in Hz
    pub pitch: f32,

    /// Raw duration in beats at the accepted tempo (rounded to 2 decimals)
    pub duration_beats: f32,

    /// Canonical beat value when matched, raw beat value otherwise
    pub quantized_beats: f32,

    /// Matched duration class, `None` when outside tolerance
    pub duration: Option<DurationClass>,
}

/// Terminal note artifact with key-aware spelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedNote {
    /// Start time in seconds
    pub start: f32,

    /// End time in seconds
    pub end: f32,

    /// Representative frequency in Hz
    pub pitch: f32,

    /// Raw duration in beats at the accepted tempo
    pub duration_beats: f32,

    /// Canonical beat value when matched, raw beat value otherwise
    pub quantized_beats: f32,

    /// Matched duration class, `None` when outside tolerance
    pub duration: Option<DurationClass>,

    /// MIDI note number, `None` for rests
    pub midi: Option<i32>,

    /// Spelled note name with octave (e.g., "A4", "Bb3"), or "Rest"
    pub note_name: String,
}

/// Transcription flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptionFlag {
    /// Key validation reported weak in-scale energy
    WeakKey,
    /// Note-based tempo estimation failed or was outvoted by the fallback
    UnstableTempo,
    /// One or more notes could not be matched to a canonical duration
    UnquantizedDurations,
}

/// Complete transcription result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Named, quantized notes in time order
    pub notes: Vec<NamedNote>,

    /// Accepted tempo with provenance
    pub tempo: SelectedTempo,

    /// Tempo acceptance decision (always `Accepted` in a returned result;
    /// a rejected tempo surfaces as an error instead)
    pub tempo_decision: TempoDecision,

    /// Estimated key with correlation confidence
    pub key: KeyEstimate,

    /// Independent in-scale-energy audit of the estimated key
    pub key_validation: KeyValidation,

    /// Transcription metadata
    pub metadata: TranscriptionMetadata,
}

/// Transcription metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionMetadata {
    /// Number of input frames
    pub frame_count: usize,

    /// Number of frames that passed the voicing gate
    pub voiced_frame_count: usize,

    /// Number of notes after segmentation
    pub note_count: usize,

    /// Time span of the frame sequence in seconds
    pub duration_seconds: f32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Transcription flags
    pub flags: Vec<TranscriptionFlag>,

    /// Low-confidence and fallback warnings
    pub warnings: Vec<String>,
}

impl Default for TranscriptionMetadata {
    fn default() -> Self {
        Self {
            frame_count: 0,
            voiced_frame_count: 0,
            note_count: 0,
            duration_seconds: 0.0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            flags: vec![],
            warnings: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        assert_eq!(Key::Major(0).name(), "C");
        assert_eq!(Key::Major(6).name(), "F#");
        assert_eq!(Key::Minor(9).name(), "Am");
        assert_eq!(Key::Minor(2).name(), "Dm");
    }

    #[test]
    fn test_scale_pitch_classes_major() {
        // C major: C D E F G A B
        assert_eq!(Key::Major(0).scale_pitch_classes(), [0, 2, 4, 5, 7, 9, 11]);
        // G major: G A B C D E F#
        assert_eq!(Key::Major(7).scale_pitch_classes(), [7, 9, 11, 0, 2, 4, 6]);
    }

    #[test]
    fn test_scale_pitch_classes_minor() {
        // A minor: A B C D E F G
        assert_eq!(Key::Minor(9).scale_pitch_classes(), [9, 11, 0, 2, 4, 5, 7]);
        // C minor: C D Eb F G Ab Bb
        assert_eq!(Key::Minor(0).scale_pitch_classes(), [0, 2, 3, 5, 7, 8, 10]);
    }

    #[test]
    fn test_duration_class_values() {
        assert_eq!(DurationClass::Whole.beats(), 4.0);
        assert_eq!(DurationClass::DottedQuarter.beats(), 1.5);
        assert_eq!(DurationClass::Sixteenth.beats(), 0.25);
        assert_eq!(DurationClass::DottedEighth.name(), "dotted_eighth");
    }

    #[test]
    fn test_duration_class_scan_order_is_longest_first() {
        let beats: Vec<f32> = DurationClass::ALL.iter().map(|c| c.beats()).collect();
        for pair in beats.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_note_event_duration() {
        let note = NoteEvent {
            start: 0.5,
            end: 1.25,
            pitch: 440.0,
        };
        assert!((note.duration() - 0.75).abs() < 1e-6);
    }
}
