//! # Monoscribe
//!
//! A monophonic transcription engine: turns a noisy, frame-wise
//! pitch-confidence stream into a symbolic musical score of discrete notes
//! with pitch, timing, quantized duration, key, tempo, and spelled note
//! names.
//!
//! ## Features
//!
//! - **Note segmentation**: streaming state machine over pitch frames with
//!   confidence gating, instrument-aware range filtering, and pitch smoothing
//! - **Tempo fusion**: independent note-based and beat-based estimates with a
//!   deterministic selection policy and an acceptance audit
//! - **Duration quantization**: nearest canonical class within tolerance,
//!   never force-snapped outside it
//! - **Key detection**: Krumhansl-Kessler correlation scan plus an
//!   independent in-scale-energy validator
//! - **Key-aware naming**: sharps or flats chosen by the key, not the note
//!
//! ## Quick Start
//!
//! ```
//! use monoscribe::{transcribe, BeatTrack, PitchFrame, TranscriptionConfig};
//!
//! // One second of steady 440 Hz from a pitch tracker
//! let frames: Vec<PitchFrame> = (0..=40)
//!     .map(|i| PitchFrame {
//!         time: i as f32 * 0.025,
//!         frequency: Some(440.0),
//!         confidence: 0.9,
//!     })
//!     .collect();
//!
//! // Beat grid from an external beat tracker
//! let beats = BeatTrack {
//!     tempo: 120.0,
//!     beats: (0..4).map(|i| i as f32 * 0.5).collect(),
//! };
//!
//! let result = transcribe(
//!     &frames,
//!     None,
//!     Some(&beats),
//!     &TranscriptionConfig::default(),
//! )?;
//!
//! assert_eq!(result.notes.len(), 1);
//! assert_eq!(result.notes[0].note_name, "A4");
//! # Ok::<(), monoscribe::TranscriptionError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline is pure and synchronous over an already-materialized frame
//! sequence:
//!
//! ```text
//! Pitch Frames → Segmenter → Tempo (note + beat → selector) → Quantizer
//!                         ↘ Key (histogram → correlation → validator) ↘
//!                                                              Namer → Result
//! ```
//!
//! Each stage consumes an immutable input and returns a new immutable value;
//! no stage mutates another's output. External collaborators (pitch tracker,
//! source separator, classifiers) live behind the traits in [`io`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod instruments;
pub mod io;

// Re-export main types
pub use analysis::result::{
    DurationClass, Key, NamedNote, NoteEvent, QuantizedNote, TranscriptionFlag,
    TranscriptionMetadata, TranscriptionResult,
};
pub use config::TranscriptionConfig;
pub use error::TranscriptionError;
pub use features::key::{KeyEstimate, KeyStatus, KeyValidation};
pub use features::tempo::{BeatTrack, SelectedTempo, TempoDecision, TempoSource};
pub use instruments::Instrument;
pub use io::{ModelRegistry, PitchFrame};

use features::key::{
    best_key_by_scale_energy, estimate_key_from_histogram, pitch_class_histogram, KeyProfiles,
};
use features::tempo::{
    estimate_tempo_from_beats, estimate_tempo_from_notes, select_tempo, validate_tempo,
};
use features::{naming, quantize, segmentation};

/// Main transcription function
///
/// Runs the full monophonic pipeline over an externally produced pitch-frame
/// sequence: segmentation, tempo selection, quantization, key detection, and
/// key-aware naming.
///
/// # Arguments
///
/// * `frames` - Pitch frames ordered by strictly increasing time
/// * `instrument` - Optional instrument bounding the admissible pitch range
/// * `beats` - Optional output of an external beat-tracking routine
/// * `config` - Transcription configuration parameters
///
/// # Errors
///
/// - `InvalidInput` for an empty or malformed frame sequence
/// - `InsufficientData` when no notes survive segmentation
/// - `TempoRejected` when the selected tempo fails the acceptance audit;
///   quantization does not proceed on an untrusted tempo
pub fn transcribe(
    frames: &[PitchFrame],
    instrument: Option<Instrument>,
    beats: Option<&BeatTrack>,
    config: &TranscriptionConfig,
) -> Result<TranscriptionResult, TranscriptionError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting transcription: {} frames (instrument={:?})",
        frames.len(),
        instrument
    );

    if frames.is_empty() {
        return Err(TranscriptionError::InvalidInput(
            "Empty frame sequence".to_string(),
        ));
    }

    let frames = io::frames::normalize_frames(frames)?;
    let mut warnings = Vec::new();
    let mut flags = Vec::new();

    // Stage 1: segmentation
    let segmentation = segmentation::segment_notes(&frames, instrument, config);
    if segmentation.notes.is_empty() {
        return Err(TranscriptionError::InsufficientData(
            "No notes detected in frame sequence".to_string(),
        ));
    }

    // Stage 2: tempo estimation and selection
    let note_tempo = estimate_tempo_from_notes(&segmentation.notes, config.min_tempo_duration);
    if let Some(reason) = &note_tempo.reason {
        warnings.push(format!("Note-based tempo unavailable: {}", reason));
    }
    let beat_tempo = estimate_tempo_from_beats(beats);

    let selected = select_tempo(&beat_tempo, &note_tempo, config.note_tempo_preference);
    let decision = validate_tempo(&selected, config.min_tempo_confidence);
    if decision == TempoDecision::Rejected {
        return Err(TranscriptionError::TempoRejected {
            tempo: selected.tempo,
            confidence: selected.confidence,
        });
    }
    if selected.source != TempoSource::NoteBased {
        flags.push(TranscriptionFlag::UnstableTempo);
    }

    // Stage 3: quantization against the accepted tempo
    let quantized = quantize::quantize_notes(
        &segmentation.notes,
        selected.tempo,
        config.quantize_tolerance,
    );
    let unknown_count = quantized.iter().filter(|n| n.duration.is_none()).count();
    if unknown_count > 0 {
        flags.push(TranscriptionFlag::UnquantizedDurations);
        warnings.push(format!(
            "{} of {} notes outside quantization tolerance",
            unknown_count,
            quantized.len()
        ));
    }

    // Stage 4: key estimation and validation
    let histogram = pitch_class_histogram(&segmentation.notes).ok_or_else(|| {
        TranscriptionError::InsufficientData("No pitched notes for key estimation".to_string())
    })?;
    let profiles = KeyProfiles::new();
    let key_estimate = match estimate_key_from_histogram(&histogram, &profiles) {
        Some(estimate) => estimate,
        None => {
            // Degenerate correlations: fall back to the scale-energy guess
            let key = best_key_by_scale_energy(&histogram);
            warnings.push(format!(
                "Key correlation degenerate; fell back to scale-energy guess {}",
                key.name()
            ));
            KeyEstimate {
                key,
                confidence: 0.0,
            }
        }
    };
    let key_validation = features::key::validate_key(
        &histogram,
        key_estimate.key,
        config.min_in_scale_energy,
    );
    if key_validation.status == features::key::KeyStatus::Weak {
        flags.push(TranscriptionFlag::WeakKey);
        warnings.push(format!(
            "Key {} has weak in-scale energy {:.3}",
            key_estimate.key.name(),
            key_validation.in_scale_energy
        ));
    }

    // Stage 5: key-aware naming
    let named = naming::name_notes(&quantized, key_estimate.key);

    let first_time = frames.first().map(|f| f.time).unwrap_or(0.0);
    let last_time = frames.last().map(|f| f.time).unwrap_or(0.0);
    let note_count = segmentation.notes.len();

    let result = TranscriptionResult {
        notes: named,
        tempo: selected,
        tempo_decision: decision,
        key: key_estimate,
        key_validation,
        metadata: TranscriptionMetadata {
            frame_count: frames.len(),
            voiced_frame_count: segmentation.voiced_frame_count,
            note_count,
            duration_seconds: last_time - first_time,
            processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            flags,
            warnings,
        },
    };

    log::debug!(
        "Transcription complete: {} notes, tempo {:.2} BPM ({:?}), key {} in {:.1}ms",
        result.notes.len(),
        result.tempo.tempo,
        result.tempo.source,
        result.key.key.name(),
        result.metadata.processing_time_ms
    );

    Ok(result)
}

/// Transcribe a waveform through an installed model registry
///
/// Invokes the registry's pitch tracker and feeds [`transcribe`]. An empty
/// tracker result is reported as `UpstreamFailure` rather than fabricating
/// plausible-looking output.
///
/// # Arguments
///
/// * `registry` - Service object holding the loaded external-model handles
/// * `samples` - Mono waveform, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `instrument` - Optional instrument bounding the admissible pitch range
/// * `beats` - Optional output of an external beat-tracking routine
/// * `config` - Transcription configuration parameters
pub fn transcribe_waveform(
    registry: &ModelRegistry,
    samples: &[f32],
    sample_rate: u32,
    instrument: Option<Instrument>,
    beats: Option<&BeatTrack>,
    config: &TranscriptionConfig,
) -> Result<TranscriptionResult, TranscriptionError> {
    if samples.is_empty() {
        return Err(TranscriptionError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(TranscriptionError::InvalidInput(
            "Sample rate must be positive".to_string(),
        ));
    }

    let frames = registry.tracker().track(samples, sample_rate)?;
    if frames.is_empty() {
        return Err(TranscriptionError::UpstreamFailure(
            "Pitch tracker returned no frames".to_string(),
        ));
    }

    transcribe(&frames, instrument, beats, config)
}
