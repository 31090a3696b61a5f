//! Key-aware note naming
//!
//! Spells quantized notes as letter names with octaves. The sharps-vs-flats
//! choice follows the key, not the note: a fixed set of flat-preferring keys
//! spells accidentals as flats, every other key uses sharps.

use crate::analysis::result::{Key, NamedNote, QuantizedNote};

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Convert a frequency in Hz to a MIDI note number
pub fn hz_to_midi(freq: f32) -> i32 {
    (69.0 + 12.0 * (freq / 440.0).log2()).round() as i32
}

/// Whether a key spells its accidentals with flats
///
/// Flat-preferring keys by tonic pitch class: F, Bb, Eb, Ab, Db, Gb, and Cb
/// major; D, G, C, F, Bb, Eb, and Ab minor. Cb major shares pitch class 11
/// with B major, so that pitch class is spelled flat in major; an arbitrary
/// but fixed resolution of the enharmonic collision.
pub fn key_prefers_flats(key: Key) -> bool {
    match key {
        Key::Major(tonic) => matches!(tonic % 12, 5 | 10 | 3 | 8 | 1 | 6 | 11),
        Key::Minor(tonic) => matches!(tonic % 12, 2 | 7 | 0 | 5 | 10 | 3 | 8),
    }
}

/// Spell a MIDI note number in the given key (e.g., "A4", "Bb3")
pub fn midi_to_note_name(midi: i32, key: Key) -> String {
    let pitch_class = midi.rem_euclid(12) as usize;
    let octave = midi.div_euclid(12) - 1;

    let name = if key_prefers_flats(key) {
        FLAT_NAMES[pitch_class]
    } else {
        SHARP_NAMES[pitch_class]
    };
    format!("{}{}", name, octave)
}

/// Assign key-aware names to quantized notes
///
/// Notes with non-positive pitch become rests (`note_name: "Rest"`, no MIDI
/// number); everything else is spelled against the key.
///
/// # Example
///
/// ```
/// use monoscribe::analysis::result::{DurationClass, Key, QuantizedNote};
/// use monoscribe::features::naming::name_notes;
///
/// let quantized = vec![QuantizedNote {
///     start: 0.0,
///     end: 1.0,
///     pitch: 440.0,
///     duration_beats: 2.0,
///     quantized_beats: 2.0,
///     duration: Some(DurationClass::Half),
/// }];
///
/// let named = name_notes(&quantized, Key::Major(0));
/// assert_eq!(named[0].note_name, "A4");
/// assert_eq!(named[0].midi, Some(69));
/// ```
pub fn name_notes(quantized: &[QuantizedNote], key: Key) -> Vec<NamedNote> {
    log::debug!("Naming {} notes in key {}", quantized.len(), key.name());

    quantized
        .iter()
        .map(|note| {
            let (midi, note_name) = if note.pitch > 0.0 {
                let midi = hz_to_midi(note.pitch);
                (Some(midi), midi_to_note_name(midi, key))
            } else {
                (None, "Rest".to_string())
            };

            NamedNote {
                start: note.start,
                end: note.end,
                pitch: note.pitch,
                duration_beats: note.duration_beats,
                quantized_beats: note.quantized_beats,
                duration: note.duration,
                midi,
                note_name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::DurationClass;

    fn quantized(pitch: f32) -> QuantizedNote {
        QuantizedNote {
            start: 0.0,
            end: 0.5,
            pitch,
            duration_beats: 1.0,
            quantized_beats: 1.0,
            duration: Some(DurationClass::Quarter),
        }
    }

    #[test]
    fn test_hz_to_midi() {
        assert_eq!(hz_to_midi(440.0), 69);
        assert_eq!(hz_to_midi(261.63), 60);
        assert_eq!(hz_to_midi(880.0), 81);
        assert_eq!(hz_to_midi(27.5), 21); // A0
    }

    #[test]
    fn test_octave_boundaries() {
        assert_eq!(midi_to_note_name(60, Key::Major(0)), "C4");
        assert_eq!(midi_to_note_name(59, Key::Major(0)), "B3");
        assert_eq!(midi_to_note_name(12, Key::Major(0)), "C0");
        assert_eq!(midi_to_note_name(69, Key::Major(0)), "A4");
    }

    #[test]
    fn test_sharp_keys_spell_sharps() {
        // MIDI 70 = Bb/A# above middle C
        assert_eq!(midi_to_note_name(70, Key::Major(7)), "A#4"); // G major
        assert_eq!(midi_to_note_name(70, Key::Major(0)), "A#4"); // C major
        assert_eq!(midi_to_note_name(70, Key::Minor(9)), "A#4"); // A minor
    }

    #[test]
    fn test_flat_keys_spell_flats() {
        assert_eq!(midi_to_note_name(70, Key::Major(5)), "Bb4"); // F major
        assert_eq!(midi_to_note_name(70, Key::Major(3)), "Bb4"); // Eb major
        assert_eq!(midi_to_note_name(70, Key::Minor(7)), "Bb4"); // G minor
        assert_eq!(midi_to_note_name(70, Key::Minor(2)), "Bb4"); // D minor
    }

    #[test]
    fn test_flat_preference_follows_key_not_note() {
        // Natural notes spell identically either way
        assert_eq!(midi_to_note_name(69, Key::Major(5)), "A4");
        assert_eq!(midi_to_note_name(69, Key::Major(7)), "A4");
    }

    #[test]
    fn test_c_minor_prefers_flats_but_c_major_does_not() {
        assert!(key_prefers_flats(Key::Minor(0)));
        assert!(!key_prefers_flats(Key::Major(0)));
    }

    #[test]
    fn test_name_notes_in_c_major() {
        let named = name_notes(&[quantized(440.0)], Key::Major(0));
        assert_eq!(named[0].note_name, "A4");
        assert_eq!(named[0].midi, Some(69));
        assert_eq!(named[0].duration, Some(DurationClass::Quarter));
    }

    #[test]
    fn test_nonpositive_pitch_becomes_rest() {
        let named = name_notes(&[quantized(0.0)], Key::Major(0));
        assert_eq!(named[0].note_name, "Rest");
        assert_eq!(named[0].midi, None);
    }
}
