//! Tempo estimation modules
//!
//! Two independent estimators with a deterministic selection policy:
//! - Note-based (median of note durations)
//! - Beat-based (from an external beat-tracking routine)
//! - Selector with confidence arbitration and an acceptance audit

pub mod beat_based;
pub mod note_based;
pub mod selector;

pub use beat_based::{estimate_tempo_from_beats, BeatTempoEstimate, BeatTrack};
pub use note_based::{estimate_tempo_from_notes, NoteTempoEstimate};
pub use selector::{select_tempo, validate_tempo, SelectedTempo, TempoDecision, TempoSource};
