//! Core types for the VoiceBox synthesis pipeline.
//!
//! This module defines the data model shared by the library:
//! - `AudioClip`, one synthesized waveform with its sample rate
//! - `SynthesisOptions` and `SynthesisRequest`, built per call
//! - `RunDirectory`, a timestamped output folder for one generation run

use std::path::{Path, PathBuf};

use crate::errors::VoiceBoxError;

// ============================================================================
// Audio Clip
// ============================================================================

/// One synthesized mono waveform.
///
/// Samples are floats in the `-1.0..=1.0` range, as returned by a speech
/// model's generate call.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Interleaved mono samples.
    pub samples: Vec<f32>,
    /// Samples per second.
    pub sample_rate: u32,
}

impl AudioClip {
    /// Create a clip from samples and a sample rate.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Whether the clip holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip length in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

// ============================================================================
// Synthesis Options
// ============================================================================

/// Style and voice-cloning options for a model call.
///
/// ## Examples
///
/// ```
/// use voicebox_lib::types::SynthesisOptions;
///
/// let options = SynthesisOptions::new()
///     .with_audio_prompt("speaker.wav")
///     .with_exaggeration(0.7);
/// assert_eq!(options.exaggeration, 0.7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    /// Reference clip for voice cloning, if any.
    pub audio_prompt: Option<PathBuf>,
    /// Expressiveness of the generated speech (clamped to 0.0-1.0).
    pub exaggeration: f32,
    /// Classifier-free guidance weight (clamped to 0.0-1.0).
    pub cfg_weight: f32,
}

impl SynthesisOptions {
    /// Create options with the model defaults (no prompt, 0.5, 0.5).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voice-cloning reference clip.
    #[must_use]
    pub fn with_audio_prompt(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_prompt = Some(path.into());
        self
    }

    /// Set the exaggeration parameter.
    #[must_use]
    pub fn with_exaggeration(mut self, exaggeration: f32) -> Self {
        self.exaggeration = exaggeration.clamp(0.0, 1.0);
        self
    }

    /// Set the cfg-weight parameter.
    #[must_use]
    pub fn with_cfg_weight(mut self, cfg_weight: f32) -> Self {
        self.cfg_weight = cfg_weight.clamp(0.0, 1.0);
        self
    }
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            audio_prompt: None,
            exaggeration: 0.5,
            cfg_weight: 0.5,
        }
    }
}

// ============================================================================
// Synthesis Request
// ============================================================================

/// One synthesis call: text, options and an optional output path.
///
/// Requests are constructed per call and discarded after use; nothing is
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// The text to synthesize.
    pub text: String,
    /// Style and voice-cloning options.
    pub options: SynthesisOptions,
    /// Destination for the audio file; a default is used when unset.
    pub output: Option<PathBuf>,
}

impl SynthesisRequest {
    /// Create a request for the given text with default options.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: SynthesisOptions::default(),
            output: None,
        }
    }

    /// Set the synthesis options.
    #[must_use]
    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the output path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

// ============================================================================
// Run Directory
// ============================================================================

/// A timestamped output folder for one generation run.
///
/// Created once per invocation and never mutated concurrently or deleted by
/// the program; a failed or stopped run leaves its partial contents in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    path: PathBuf,
}

impl RunDirectory {
    /// Create `run_<YYYYmmdd_HHMMSS>` under `root`, including parents.
    pub fn create(root: &Path) -> Result<Self, VoiceBoxError> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = root.join(format!("run_{timestamp}"));
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// The run folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the handle, returning the run folder path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

// ============================================================================
// Tests
// ============================================================================
