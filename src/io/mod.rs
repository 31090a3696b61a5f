//! Boundary contracts with external collaborators
//!
//! The engine itself consumes and produces in-memory structures only. The
//! traits here describe the excluded collaborators (pitch tracker, source
//! separator, classifiers) at their interface, and [`ModelRegistry`] is the
//! explicitly constructed service object that owns their loaded handles.

pub mod frames;

pub use frames::{normalize_frames, PitchFrame};

use crate::error::TranscriptionError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stem vocabulary produced by source separation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemKind {
    /// Percussion stem
    Drums,
    /// Bass stem
    Bass,
    /// Vocal stem
    Vocals,
    /// Residual stem (everything else)
    Other,
}

/// Broad sound category tagged on classifier output
///
/// Replaces keyword-substring filtering of labels: consumers match on this
/// tag, never on the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    /// Pitched instrument
    Instrument,
    /// Human voice
    Voice,
    /// Unpitched percussion
    Percussion,
    /// Ambience, noise, or anything unclassifiable
    Other,
}

/// One labeled classification with confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Human-readable label (e.g., "flute")
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Tagged category of the detected sound
    pub category: SoundCategory,
}

/// Monophonic vs polyphonic verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioType {
    /// Single melodic line
    Monophonic,
    /// Multiple simultaneous voices
    Polyphonic,
}

/// Audio-type verdict with confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeDetection {
    /// Detected audio type
    pub audio_type: AudioType,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,
}

/// Fundamental-frequency tracker boundary
///
/// Implementations wrap a pre-trained pitch model. Frames must be ordered by
/// strictly increasing time with confidence in [0, 1].
pub trait PitchTracker: Send + Sync {
    /// Track pitch over a mono waveform
    fn track(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Vec<PitchFrame>, TranscriptionError>;
}

/// Audio source separation boundary
pub trait SourceSeparator: Send + Sync {
    /// Separate a mono waveform into per-stem waveforms
    fn separate(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<HashMap<StemKind, Vec<f32>>, TranscriptionError>;
}

/// Instrument/audio classification boundary
pub trait InstrumentClassifier: Send + Sync {
    /// Classify the dominant sound sources in a waveform
    fn classify(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<Vec<Classification>, TranscriptionError>;
}

/// Monophonic/polyphonic detection boundary
pub trait AudioTypeDetector: Send + Sync {
    /// Decide whether a waveform carries one melodic line or several
    fn detect_type(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<TypeDetection, TranscriptionError>;
}

/// Service object owning the loaded external-model handles
///
/// Built once, explicitly, at process startup and passed by reference into
/// request-handling code. Models are loaded when the registry is constructed,
/// not lazily on first use scattered across modules.
pub struct ModelRegistry {
    tracker: Box<dyn PitchTracker>,
    separator: Option<Box<dyn SourceSeparator>>,
    classifier: Option<Box<dyn InstrumentClassifier>>,
    type_detector: Option<Box<dyn AudioTypeDetector>>,
}

impl ModelRegistry {
    /// Create a registry with a pitch tracker only
    ///
    /// The tracker is the one collaborator the transcription pipeline cannot
    /// run without; the others are optional front-door concerns.
    pub fn new(tracker: Box<dyn PitchTracker>) -> Self {
        Self {
            tracker,
            separator: None,
            classifier: None,
            type_detector: None,
        }
    }

    /// Attach a source separator handle
    pub fn with_separator(mut self, separator: Box<dyn SourceSeparator>) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Attach an instrument classifier handle
    pub fn with_classifier(mut self, classifier: Box<dyn InstrumentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Attach an audio-type detector handle
    pub fn with_type_detector(mut self, detector: Box<dyn AudioTypeDetector>) -> Self {
        self.type_detector = Some(detector);
        self
    }

    /// The pitch tracker handle
    pub fn tracker(&self) -> &dyn PitchTracker {
        self.tracker.as_ref()
    }

    /// The source separator handle, if attached
    pub fn separator(&self) -> Option<&dyn SourceSeparator> {
        self.separator.as_deref()
    }

    /// The instrument classifier handle, if attached
    pub fn classifier(&self) -> Option<&dyn InstrumentClassifier> {
        self.classifier.as_deref()
    }

    /// The audio-type detector handle, if attached
    pub fn type_detector(&self) -> Option<&dyn AudioTypeDetector> {
        self.type_detector.as_deref()
    }
}

static GLOBAL_REGISTRY: OnceCell<ModelRegistry> = OnceCell::new();

/// Install the process-wide model registry
///
/// The registry may be installed exactly once; the cell makes initialization
/// safe from multiple concurrent requests. A second install fails explicitly
/// with the registry handed back to the caller.
pub fn install_registry(registry: ModelRegistry) -> Result<(), ModelRegistry> {
    GLOBAL_REGISTRY.set(registry)
}

/// The process-wide model registry, if one has been installed
pub fn global_registry() -> Option<&'static ModelRegistry> {
    GLOBAL_REGISTRY.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTracker(Vec<PitchFrame>);

    impl PitchTracker for FixedTracker {
        fn track(
            &self,
            _samples: &[f32],
            _sample_rate: u32,
        ) -> Result<Vec<PitchFrame>, TranscriptionError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_registry_holds_tracker() {
        let frames = vec![PitchFrame {
            time: 0.0,
            frequency: Some(440.0),
            confidence: 0.9,
        }];
        let registry = ModelRegistry::new(Box::new(FixedTracker(frames.clone())));

        let tracked = registry.tracker().track(&[0.0; 16], 16000).unwrap();
        assert_eq!(tracked, frames);
        assert!(registry.separator().is_none());
        assert!(registry.classifier().is_none());
    }

    #[test]
    fn test_optional_handles_attach() {
        struct NoopDetector;
        impl AudioTypeDetector for NoopDetector {
            fn detect_type(
                &self,
                _samples: &[f32],
                _sample_rate: u32,
            ) -> Result<TypeDetection, TranscriptionError> {
                Ok(TypeDetection {
                    audio_type: AudioType::Monophonic,
                    confidence: 0.9,
                })
            }
        }

        let registry = ModelRegistry::new(Box::new(FixedTracker(vec![])))
            .with_type_detector(Box::new(NoopDetector));

        let verdict = registry
            .type_detector()
            .unwrap()
            .detect_type(&[0.0; 16], 16000)
            .unwrap();
        assert_eq!(verdict.audio_type, AudioType::Monophonic);
    }

    #[test]
    fn test_global_registry_installs_once() {
        let first = install_registry(ModelRegistry::new(Box::new(FixedTracker(vec![]))));
        assert!(first.is_ok());
        assert!(global_registry().is_some());

        // Second install hands the registry back instead of replacing
        let second = install_registry(ModelRegistry::new(Box::new(FixedTracker(vec![]))));
        assert!(second.is_err());
    }

    #[test]
    fn test_classification_serde_shape() {
        let c = Classification {
            label: "flute".to_string(),
            confidence: 0.8,
            category: SoundCategory::Instrument,
        };
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["category"], "instrument");
        assert_eq!(json["label"], "flute");
    }
}
