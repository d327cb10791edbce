//! Single-shot and batched speech synthesis.
//!
//! Batched synthesis drives the chunker output through one model call per
//! batch, writing `batch_<i>.wav` files into a timestamped run folder. The
//! loop is sequential; a cancellation token is checked between batches and
//! a model failure abandons the rest of the run, keeping what was written.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::audio::write_wav;
use crate::cancel::CancelToken;
use crate::chunker::{ChunkerConfig, chunk_text};
use crate::errors::VoiceBoxError;
use crate::phrases::normalize_quotes;
use crate::traits::SpeechModel;
use crate::types::{RunDirectory, SynthesisOptions, SynthesisRequest};

/// Default output path for single-shot synthesis.
const DEFAULT_OUTPUT: &str = "tts_output/output.wav";

/// How a batched synthesis run ended.
///
/// A stopped run is an informational result, not a failure; the files
/// written before the stop stay on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every batch was synthesized.
    Completed {
        /// The run folder holding the batch files.
        run_dir: PathBuf,
        /// Number of batches written.
        batches: usize,
        /// Path of the first batch file, suitable for immediate playback.
        first_output: PathBuf,
    },
    /// The run was cancelled between batches.
    Stopped {
        /// The run folder holding the batches written before the stop.
        run_dir: PathBuf,
        /// Number of batches written before the stop.
        batches_written: usize,
    },
}

/// Synthesize one waveform and write it to the requested output path.
///
/// ## Errors
///
/// Empty or whitespace-only text is refused with
/// [`VoiceBoxError::EmptyText`]; model and I/O failures propagate.
pub async fn synthesize<M: SpeechModel>(
    model: &M,
    request: &SynthesisRequest,
) -> Result<PathBuf, VoiceBoxError> {
    let text = normalize_quotes(request.text.trim());
    if text.is_empty() {
        return Err(VoiceBoxError::EmptyText);
    }

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let clip = model.generate(&text, &request.options).await?;
    write_wav(&clip, &output)?;
    info!(path = %output.display(), "Synthesis complete");
    Ok(output)
}

/// Synthesize `text` in sentence-aligned batches under `output_root`.
///
/// The cancellation token is observed between batches only — never
/// mid-batch — and is cleared when a stop is taken so the next run starts
/// fresh.
///
/// ## Errors
///
/// Text that chunks to nothing is refused with
/// [`VoiceBoxError::EmptyText`]. A model failure aborts the remaining
/// batches with [`VoiceBoxError::GenerationFailed`]; batches already on
/// disk are kept.
pub async fn synthesize_batched<M: SpeechModel>(
    model: &M,
    text: &str,
    chunker: &ChunkerConfig,
    options: &SynthesisOptions,
    output_root: &Path,
    cancel: &CancelToken,
) -> Result<BatchOutcome, VoiceBoxError> {
    let batches = chunk_text(&normalize_quotes(text), chunker);
    if batches.is_empty() {
        return Err(VoiceBoxError::EmptyText);
    }

    let run = RunDirectory::create(output_root)?;
    info!(run = %run.path().display(), batches = batches.len(), "Starting batched synthesis");

    for (i, batch) in batches.iter().enumerate() {
        if cancel.take() {
            info!(batches_written = i, "Generation stopped");
            return Ok(BatchOutcome::Stopped {
                run_dir: run.into_path(),
                batches_written: i,
            });
        }

        debug!(batch = i + 1, total = batches.len(), "Synthesizing batch");
        let clip = model
            .generate(batch, options)
            .await
            .map_err(|e| VoiceBoxError::GenerationFailed {
                index: i,
                source: Box::new(e),
            })?;
        write_wav(&clip, &run.path().join(format!("batch_{i}.wav")))?;
    }

    let first_output = run.path().join("batch_0.wav");
    Ok(BatchOutcome::Completed {
        batches: batches.len(),
        first_output,
        run_dir: run.into_path(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::ChunkUnit;
    use crate::types::AudioClip;
    use std::sync::Mutex;

    /// Records generated texts; optionally fails on one batch, or cancels
    /// a token after each call to emulate a stop request arriving
    /// mid-run.
    struct ScriptedModel {
        texts: Mutex<Vec<String>>,
        fail_on: Option<usize>,
        cancel_after_call: Option<CancelToken>,
    }

    impl ScriptedModel {
        fn recording() -> Self {
            Self {
                texts: Mutex::new(Vec::new()),
                fail_on: None,
                cancel_after_call: None,
            }
        }

        fn failing_at(index: usize) -> Self {
            Self {
                fail_on: Some(index),
                ..Self::recording()
            }
        }

        fn cancelling(token: CancelToken) -> Self {
            Self {
                cancel_after_call: Some(token),
                ..Self::recording()
            }
        }
    }

    impl SpeechModel for ScriptedModel {
        async fn generate(
            &self,
            text: &str,
            _options: &SynthesisOptions,
        ) -> Result<AudioClip, VoiceBoxError> {
            let call_index = {
                let mut texts = self.texts.lock().unwrap();
                texts.push(text.to_string());
                texts.len() - 1
            };
            if self.fail_on == Some(call_index) {
                return Err(VoiceBoxError::ProcessFailed {
                    program: "scripted".into(),
                    stderr: "boom".into(),
                });
            }
            if let Some(token) = &self.cancel_after_call {
                token.cancel();
            }
            Ok(AudioClip::new(vec![0.0; 240], 24_000))
        }

        async fn is_ready(&self) -> bool {
            true
        }

        fn info(&self) -> &str {
            "scripted"
        }
    }

    fn chars(budget: usize) -> ChunkerConfig {
        ChunkerConfig::new(budget).with_unit(ChunkUnit::Characters)
    }

    // ========================================================================
    // Single-shot tests
    // ========================================================================

    #[tokio::test]
    async fn test_synthesize_writes_requested_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/voice.wav");
        let model = ScriptedModel::recording();

        let request = SynthesisRequest::new("Hello there.").with_output(&out);
        let written = synthesize(&model, &request).await.unwrap();

        assert_eq!(written, out);
        assert!(out.is_file());
        assert_eq!(model.texts.lock().unwrap().as_slice(), ["Hello there."]);
    }

    #[tokio::test]
    async fn test_synthesize_normalizes_curly_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::recording();
        let request =
            SynthesisRequest::new("It\u{2019}s fine.").with_output(dir.path().join("q.wav"));
        synthesize(&model, &request).await.unwrap();
        assert_eq!(model.texts.lock().unwrap().as_slice(), ["It's fine."]);
    }

    #[tokio::test]
    async fn test_synthesize_refuses_empty_text() {
        let model = ScriptedModel::recording();
        let result = synthesize(&model, &SynthesisRequest::new("   \n")).await;
        assert!(matches!(result, Err(VoiceBoxError::EmptyText)));
        assert!(model.texts.lock().unwrap().is_empty());
    }

    // ========================================================================
    // Batched tests
    // ========================================================================

    #[tokio::test]
    async fn test_batched_writes_one_file_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::recording();
        let outcome = synthesize_batched(
            &model,
            "One sentence. Two sentence. Three sentence.",
            &chars(10),
            &SynthesisOptions::default(),
            dir.path(),
            &CancelToken::new(),
        )
        .await
        .unwrap();

        let BatchOutcome::Completed {
            run_dir,
            batches,
            first_output,
        } = outcome
        else {
            panic!("expected completion");
        };
        assert_eq!(batches, 3);
        assert_eq!(first_output, run_dir.join("batch_0.wav"));
        for i in 0..3 {
            assert!(run_dir.join(format!("batch_{i}.wav")).is_file());
        }
    }

    #[tokio::test]
    async fn test_batched_empty_text_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::recording();
        let result = synthesize_batched(
            &model,
            "  \n ",
            &chars(10),
            &SynthesisOptions::default(),
            dir.path(),
            &CancelToken::new(),
        )
        .await;
        assert!(matches!(result, Err(VoiceBoxError::EmptyText)));
        // No run folder was created for the refused request.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_batched_failure_keeps_earlier_batches() {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::failing_at(1);
        let result = synthesize_batched(
            &model,
            "One sentence. Two sentence. Three sentence.",
            &chars(10),
            &SynthesisOptions::default(),
            dir.path(),
            &CancelToken::new(),
        )
        .await;

        assert!(matches!(
            result,
            Err(VoiceBoxError::GenerationFailed { index: 1, .. })
        ));

        let run_dir = std::fs::read_dir(dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();
        assert!(run_dir.join("batch_0.wav").is_file());
        assert!(!run_dir.join("batch_1.wav").exists());
        // The model was not asked for batch 2.
        assert_eq!(model.texts.lock().unwrap().len(), 2);
    }

    // ========================================================================
    // Cancellation tests
    // ========================================================================

    #[tokio::test]
    async fn test_cancellation_stops_between_batches_and_clears_token() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancelToken::new();
        let model = ScriptedModel::cancelling(cancel.clone());

        let outcome = synthesize_batched(
            &model,
            "One sentence. Two sentence. Three sentence.",
            &chars(10),
            &SynthesisOptions::default(),
            dir.path(),
            &cancel,
        )
        .await
        .unwrap();

        // The first batch completed, then the stop was observed before the
        // second model call.
        let BatchOutcome::Stopped {
            run_dir,
            batches_written,
        } = outcome
        else {
            panic!("expected a stop");
        };
        assert_eq!(batches_written, 1);
        assert!(run_dir.join("batch_0.wav").is_file());
        assert!(!run_dir.join("batch_1.wav").exists());
        assert_eq!(model.texts.lock().unwrap().len(), 1);
        // Cleared for the next run.
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_pre_cancelled_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let model = ScriptedModel::recording();

        let outcome = synthesize_batched(
            &model,
            "One sentence.",
            &chars(10),
            &SynthesisOptions::default(),
            dir.path(),
            &cancel,
        )
        .await
        .unwrap();

        assert!(matches!(
            outcome,
            BatchOutcome::Stopped {
                batches_written: 0,
                ..
            }
        ));
        assert!(model.texts.lock().unwrap().is_empty());
    }
}
