//! Trait seams for the external model and trainer collaborators.
//!
//! The acoustic model and the fine-tuning trainer are black boxes; the
//! library only ever reaches them through these traits.

use std::path::Path;

use crate::errors::VoiceBoxError;
use crate::types::{AudioClip, SynthesisOptions};

/// A speech synthesis model.
///
/// ## Native Async Traits
///
/// Uses native Rust async functions in traits (AFIT); no `async-trait`
/// crate is needed. Implementations must be `Send + Sync` so one
/// long-lived model handle can be shared by reference across request
/// handlers.
///
/// ## Examples
///
/// ```ignore
/// use voicebox_lib::{AudioClip, SpeechModel, SynthesisOptions, VoiceBoxError};
///
/// struct MyModel;
///
/// impl SpeechModel for MyModel {
///     async fn generate(
///         &self,
///         text: &str,
///         options: &SynthesisOptions,
///     ) -> Result<AudioClip, VoiceBoxError> {
///         // run the model
///         Ok(AudioClip::new(vec![0.0; 240], 24_000))
///     }
///
///     async fn is_ready(&self) -> bool {
///         true
///     }
///
///     fn info(&self) -> &str {
///         "my model"
///     }
/// }
/// ```
pub trait SpeechModel: Send + Sync {
    /// Synthesize one waveform for `text`.
    ///
    /// ## Errors
    ///
    /// Returns `VoiceBoxError` when the underlying model call fails; the
    /// caller converts this into a reportable message and abandons the
    /// remainder of the current run.
    fn generate(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> impl std::future::Future<Output = Result<AudioClip, VoiceBoxError>> + Send;

    /// Whether the model can currently be invoked.
    fn is_ready(&self) -> impl std::future::Future<Output = bool> + Send;

    /// A short human-readable description of the model.
    fn info(&self) -> &str;
}

/// A fine-tuning trainer.
///
/// Training is a direct pass-through: the implementation hands the dataset
/// to an external trainer and reports success or failure, nothing more.
pub trait SpeechTrainer: Send + Sync {
    /// Fine-tune on `dataset` for `epochs`, writing artifacts to `output`.
    fn fit(
        &self,
        dataset: &Path,
        epochs: u32,
        output: &Path,
    ) -> impl std::future::Future<Output = Result<(), VoiceBoxError>> + Send;

    /// Whether the trainer can currently be invoked.
    fn is_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioClip;

    struct MockModel {
        should_fail: bool,
    }

    impl SpeechModel for MockModel {
        async fn generate(
            &self,
            _text: &str,
            _options: &SynthesisOptions,
        ) -> Result<AudioClip, VoiceBoxError> {
            if self.should_fail {
                Err(VoiceBoxError::ProcessFailed {
                    program: "mock".into(),
                    stderr: "intentional failure".into(),
                })
            } else {
                Ok(AudioClip::new(vec![0.0; 100], 24_000))
            }
        }

        async fn is_ready(&self) -> bool {
            true
        }

        fn info(&self) -> &str {
            "mock model"
        }
    }

    #[tokio::test]
    async fn test_mock_model_success() {
        let model = MockModel { should_fail: false };
        let clip = model
            .generate("test", &SynthesisOptions::default())
            .await
            .unwrap();
        assert_eq!(clip.sample_rate, 24_000);
    }

    #[tokio::test]
    async fn test_mock_model_failure() {
        let model = MockModel { should_fail: true };
        let result = model.generate("test", &SynthesisOptions::default()).await;
        assert!(result.is_err());
    }
}
