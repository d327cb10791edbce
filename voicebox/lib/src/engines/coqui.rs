//! Fine-tuned model synthesis and training through the Coqui CLIs.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::audio::read_wav;
use crate::engines::capture_failure;
use crate::errors::VoiceBoxError;
use crate::traits::{SpeechModel, SpeechTrainer};
use crate::types::{AudioClip, SynthesisOptions};

/// Model artifact written by a training run.
pub const MODEL_ARTIFACT: &str = "best_model.pth";

/// Config artifact written by a training run.
pub const CONFIG_ARTIFACT: &str = "coqui_config.json";

// ============================================================================
// Coqui Engine
// ============================================================================

/// Synthesis with a fine-tuned model via the Coqui `tts` CLI.
///
/// The fine-tuned voice is baked into the model artifacts, so voice-clone
/// prompts are ignored here; callers wanting cloning use the pretrained
/// engine instead.
#[derive(Debug, Clone)]
pub struct CoquiEngine {
    program: String,
    model_path: PathBuf,
    config_path: PathBuf,
}

impl CoquiEngine {
    /// Default binary name.
    const PROGRAM: &'static str = "tts";

    /// Point the engine at the artifacts of a training output directory.
    pub fn from_output_dir(output_dir: &Path) -> Self {
        Self {
            program: Self::PROGRAM.into(),
            model_path: output_dir.join(MODEL_ARTIFACT),
            config_path: output_dir.join(CONFIG_ARTIFACT),
        }
    }

    /// Use explicit artifact paths.
    pub fn with_artifacts(model_path: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            program: Self::PROGRAM.into(),
            model_path: model_path.into(),
            config_path: config_path.into(),
        }
    }

    /// Override the binary name.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Whether both model artifacts exist on disk.
    pub fn artifacts_exist(&self) -> bool {
        self.model_path.exists() && self.config_path.exists()
    }
}

impl SpeechModel for CoquiEngine {
    async fn generate(
        &self,
        text: &str,
        _options: &SynthesisOptions,
    ) -> Result<AudioClip, VoiceBoxError> {
        let temp_dir = tempfile::tempdir()?;
        let output_path = temp_dir.path().join("output.wav");

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg("--text").arg(text);
        cmd.arg("--model_path").arg(&self.model_path);
        cmd.arg("--config_path").arg(&self.config_path);
        cmd.arg("--out_path").arg(&output_path);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(program = %self.program, model = %self.model_path.display(), "Running tts");

        let output = cmd
            .output()
            .await
            .map_err(|e| VoiceBoxError::ProcessSpawnFailed {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(VoiceBoxError::ProcessFailed {
                program: self.program.clone(),
                stderr: capture_failure(&output),
            });
        }

        read_wav(&output_path)
    }

    async fn is_ready(&self) -> bool {
        which::which(&self.program).is_ok() && self.artifacts_exist()
    }

    fn info(&self) -> &str {
        "Coqui TTS - synthesis with a locally fine-tuned model"
    }
}

// ============================================================================
// Coqui Trainer
// ============================================================================

/// Fine-tuning through an external trainer command.
///
/// Training is a pass-through: the command gets the dataset folder, the
/// epoch count and the output directory, and its exit status decides
/// success. The program name honors a `TRAINER_BIN` override.
#[derive(Debug, Clone)]
pub struct CoquiTrainer {
    program: String,
}

impl CoquiTrainer {
    /// Default binary name.
    const PROGRAM: &'static str = "tts-train";

    /// Create a trainer, honoring a `TRAINER_BIN` override.
    pub fn new() -> Self {
        let program = std::env::var("TRAINER_BIN").unwrap_or_else(|_| Self::PROGRAM.into());
        Self { program }
    }

    /// Create a trainer invoking a specific command.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CoquiTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechTrainer for CoquiTrainer {
    async fn fit(
        &self,
        dataset: &Path,
        epochs: u32,
        output: &Path,
    ) -> Result<(), VoiceBoxError> {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg("--dataset").arg(dataset);
        cmd.arg("--epochs").arg(epochs.to_string());
        cmd.arg("--output").arg(output);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(program = %self.program, epochs, "Running trainer");

        let result = cmd
            .output()
            .await
            .map_err(|e| VoiceBoxError::ProcessSpawnFailed {
                program: self.program.clone(),
                source: e,
            })?;

        if !result.status.success() {
            return Err(VoiceBoxError::ProcessFailed {
                program: self.program.clone(),
                stderr: capture_failure(&result),
            });
        }

        Ok(())
    }

    async fn is_ready(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
