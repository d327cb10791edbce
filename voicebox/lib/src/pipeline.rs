//! The full dataset → train → synthesize pipeline.

use std::path::PathBuf;

use tracing::info;

use crate::dataset::generate_dataset;
use crate::errors::VoiceBoxError;
use crate::phrases::load_phrases;
use crate::synthesis::synthesize;
use crate::traits::{SpeechModel, SpeechTrainer};
use crate::training::train;
use crate::types::{SynthesisOptions, SynthesisRequest};

/// Default check phrase synthesized after training.
const CHECK_PHRASE: &str = "This is a test of the trained model.";

/// Configuration for one pipeline run.
///
/// ## Examples
///
/// ```
/// use voicebox_lib::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::new().with_epochs(100);
/// assert_eq!(config.epochs, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Existing dataset folder; generated from the phrase list when unset.
    pub dataset: Option<PathBuf>,
    /// Phrase list used when no dataset is provided.
    pub phrases_file: PathBuf,
    /// Training epochs.
    pub epochs: u32,
    /// Text synthesized after training as a check of the result.
    pub text: String,
    /// Style and voice-cloning options for generation.
    pub options: SynthesisOptions,
    /// Root folder for generated dataset runs.
    pub runs_root: PathBuf,
    /// Training output directory; also receives the check synthesis.
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Create a config with the stock defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing dataset folder instead of generating one.
    #[must_use]
    pub fn with_dataset(mut self, dataset: impl Into<PathBuf>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Set the phrase list file.
    #[must_use]
    pub fn with_phrases_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.phrases_file = path.into();
        self
    }

    /// Set the epoch count.
    #[must_use]
    pub fn with_epochs(mut self, epochs: u32) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the post-training check phrase.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the synthesis options.
    #[must_use]
    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            phrases_file: PathBuf::from("phonic_lines.txt"),
            epochs: 50,
            text: CHECK_PHRASE.into(),
            options: SynthesisOptions::default(),
            runs_root: PathBuf::from("runs"),
            output_dir: PathBuf::from("tts_output"),
        }
    }
}

/// What a completed pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// The dataset folder used for training.
    pub dataset_dir: PathBuf,
    /// The synthesized check audio.
    pub audio_output: PathBuf,
}

/// Run the full pipeline: obtain a dataset, train, synthesize the check
/// phrase.
///
/// Each stage's failure stops the run; nothing written by earlier stages
/// is cleaned up.
pub async fn run_pipeline<M: SpeechModel, T: SpeechTrainer>(
    model: &M,
    trainer: &T,
    config: &PipelineConfig,
) -> Result<PipelineReport, VoiceBoxError> {
    info!("Starting full pipeline");

    let dataset_dir = match &config.dataset {
        Some(dir) => {
            if !dir.exists() {
                return Err(VoiceBoxError::DatasetNotFound {
                    path: dir.clone(),
                });
            }
            info!(dataset = %dir.display(), "Using provided dataset");
            dir.clone()
        }
        None => {
            let phrases = load_phrases(&config.phrases_file).await?;
            generate_dataset(model, &phrases, &config.options, &config.runs_root)
                .await?
                .root
        }
    };

    train(trainer, &dataset_dir, config.epochs, &config.output_dir).await?;

    if config.text.trim().is_empty() {
        return Err(VoiceBoxError::EmptyText);
    }
    let request = SynthesisRequest::new(config.text.clone())
        .with_options(config.options.clone())
        .with_output(config.output_dir.join("output.wav"));
    let audio_output = synthesize(model, &request).await?;

    Ok(PipelineReport {
        dataset_dir,
        audio_output,
    })
}

// ============================================================================
// Tests
// ============================================================================
