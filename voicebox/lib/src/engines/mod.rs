//! Subprocess-backed speech engines and trainers.
//!
//! Each engine shells out to a CLI tool, reads the wav it produced and
//! returns it as an [`AudioClip`]. The engines are the only place the
//! library touches the underlying models.

mod chatterbox;
mod coqui;

use std::path::Path;

pub use chatterbox::ChatterboxEngine;
pub use coqui::{CoquiEngine, CoquiTrainer};

use crate::errors::VoiceBoxError;
use crate::traits::SpeechModel;
use crate::types::{AudioClip, SynthesisOptions};

/// Unified engine enum for runtime model selection.
#[derive(Debug, Clone)]
pub enum Engine {
    /// The pretrained model, with optional voice-clone prompts.
    Chatterbox(ChatterboxEngine),
    /// A fine-tuned model synthesized through the Coqui CLI.
    Coqui(CoquiEngine),
}

impl Engine {
    /// Pick an engine for synthesis.
    ///
    /// Prefers a fine-tuned model when its artifacts exist under
    /// `output_dir`, falling back to the pretrained engine.
    pub fn select(output_dir: &Path) -> Engine {
        let coqui = CoquiEngine::from_output_dir(output_dir);
        if coqui.artifacts_exist() {
            Engine::Coqui(coqui)
        } else {
            Engine::Chatterbox(ChatterboxEngine::new())
        }
    }
}

impl SpeechModel for Engine {
    async fn generate(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<AudioClip, VoiceBoxError> {
        match self {
            Engine::Chatterbox(e) => e.generate(text, options).await,
            Engine::Coqui(e) => e.generate(text, options).await,
        }
    }

    async fn is_ready(&self) -> bool {
        match self {
            Engine::Chatterbox(e) => e.is_ready().await,
            Engine::Coqui(e) => e.is_ready().await,
        }
    }

    fn info(&self) -> &str {
        match self {
            Engine::Chatterbox(e) => e.info(),
            Engine::Coqui(e) => e.info(),
        }
    }
}

/// Capture a failed process's diagnostics, falling back to stdout.
///
/// Some TTS CLIs write their errors to stdout rather than stderr.
pub(crate) fn capture_failure(output: &std::process::Output) -> String {
    if output.stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
