//! Pretrained Chatterbox engine.
//!
//! Shells out to the `chatterbox` CLI. With a voice-clone reference clip
//! the generated voice mimics the speaker in the clip; without one the
//! model's built-in voice is used.

use std::process::Stdio;

use tracing::debug;

use crate::audio::read_wav;
use crate::engines::capture_failure;
use crate::errors::VoiceBoxError;
use crate::traits::SpeechModel;
use crate::types::{AudioClip, SynthesisOptions};

/// The pretrained text-to-speech engine.
///
/// ## Examples
///
/// ```ignore
/// use voicebox_lib::{ChatterboxEngine, SpeechModel, SynthesisOptions};
///
/// let engine = ChatterboxEngine::new();
/// let clip = engine
///     .generate("Hello, world!", &SynthesisOptions::default())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ChatterboxEngine {
    program: String,
}

impl ChatterboxEngine {
    /// Default binary name.
    const PROGRAM: &'static str = "chatterbox";

    /// Create an engine, honoring a `CHATTERBOX_BIN` override.
    pub fn new() -> Self {
        let program = std::env::var("CHATTERBOX_BIN").unwrap_or_else(|_| Self::PROGRAM.into());
        Self { program }
    }

    /// Create an engine invoking a specific binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ChatterboxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechModel for ChatterboxEngine {
    async fn generate(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<AudioClip, VoiceBoxError> {
        // Tempdir rather than a named file: the CLI refuses pre-existing
        // output files.
        let temp_dir = tempfile::tempdir()?;
        let input_path = temp_dir.path().join("input.txt");
        tokio::fs::write(&input_path, text).await?;
        let output_path = temp_dir.path().join("output.wav");

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg(&input_path);
        cmd.arg(&output_path);
        if let Some(prompt) = &options.audio_prompt {
            cmd.arg("--ref").arg(prompt);
        }
        cmd.arg("--exaggeration").arg(options.exaggeration.to_string());
        cmd.arg("--cfg-weight").arg(options.cfg_weight.to_string());

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(
            program = %self.program,
            cloned = options.audio_prompt.is_some(),
            "Running chatterbox"
        );

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
        which::which(&self.program).is_ok()
    }

    fn info(&self) -> &str {
        "Chatterbox - pretrained neural TTS with zero-shot voice cloning from a reference clip"
    }
}

// ============================================================================
// Tests
// ============================================================================
