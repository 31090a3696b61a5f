//! Instrument taxonomy and admissible pitch ranges
//!
//! A closed set of supported instruments, each bounding the frequency range
//! the segmenter will accept as a plausible fundamental. Unknown labels fail
//! explicitly rather than defaulting to an unbounded range.

use crate::error::TranscriptionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported monophonic instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    /// Flute (C4 - C7)
    Flute,
    /// Violin (G3 - A7)
    Violin,
    /// Solo voice (practical singing range)
    Voice,
    /// Cello (C2 - E5)
    Cello,
    /// Organ (fundamental pitches, C0 - A7)
    Organ,
}

impl Instrument {
    /// Admissible fundamental frequency range in Hz (inclusive)
    pub fn frequency_range(&self) -> (f32, f32) {
        match self {
            Instrument::Flute => (260.0, 2100.0),
            Instrument::Violin => (196.0, 3500.0),
            Instrument::Voice => (80.0, 1100.0),
            Instrument::Cello => (65.0, 660.0),
            Instrument::Organ => (16.0, 3500.0),
        }
    }

    /// True if `freq` is a plausible fundamental for this instrument
    pub fn contains(&self, freq: f32) -> bool {
        let (lo, hi) = self.frequency_range();
        freq >= lo && freq <= hi
    }

    /// Lowercase label used by the classifier boundary ("flute", "voice", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Instrument::Flute => "flute",
            Instrument::Violin => "violin",
            Instrument::Voice => "voice",
            Instrument::Cello => "cello",
            Instrument::Organ => "organ",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Instrument {
    type Err = TranscriptionError;

    /// Parse an instrument label, failing explicitly on unknown tags
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flute" => Ok(Instrument::Flute),
            "violin" => Ok(Instrument::Violin),
            "voice" => Ok(Instrument::Voice),
            "cello" => Ok(Instrument::Cello),
            "organ" => Ok(Instrument::Organ),
            other => Err(TranscriptionError::InvalidInput(format!(
                "Unknown instrument label: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_ranges() {
        assert_eq!(Instrument::Flute.frequency_range(), (260.0, 2100.0));
        assert_eq!(Instrument::Voice.frequency_range(), (80.0, 1100.0));
        assert_eq!(Instrument::Cello.frequency_range(), (65.0, 660.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        assert!(Instrument::Voice.contains(80.0));
        assert!(Instrument::Voice.contains(1100.0));
        assert!(!Instrument::Voice.contains(79.9));
        assert!(!Instrument::Voice.contains(1100.1));
    }

    #[test]
    fn test_parse_known_labels() {
        assert_eq!("flute".parse::<Instrument>().unwrap(), Instrument::Flute);
        assert_eq!("organ".parse::<Instrument>().unwrap(), Instrument::Organ);
    }

    #[test]
    fn test_parse_unknown_label_fails() {
        let err = "theremin".parse::<Instrument>().unwrap_err();
        assert!(matches!(err, TranscriptionError::InvalidInput(_)));
        assert!(err.to_string().contains("theremin"));
    }
}
