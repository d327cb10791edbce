//! Dataset validation and trainer hand-off.

use std::path::Path;

use tracing::info;

use crate::dataset::{METADATA_FILE, WAVS_DIR};
use crate::errors::VoiceBoxError;
use crate::traits::SpeechTrainer;

/// Check that `path` looks like a generated dataset run folder.
///
/// Validates, in order: the folder exists, it holds a `metadata.csv`, and
/// it holds a `wavs/` directory. Each failure is its own reportable error
/// so the caller can say exactly what is missing.
pub fn validate_dataset(path: &Path) -> Result<(), VoiceBoxError> {
    if !path.exists() {
        return Err(VoiceBoxError::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.join(METADATA_FILE).exists() {
        return Err(VoiceBoxError::MetadataMissing {
            path: path.to_path_buf(),
        });
    }
    if !path.join(WAVS_DIR).is_dir() {
        return Err(VoiceBoxError::WavsMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Fine-tune on a validated dataset.
///
/// Validation failures are reported before the trainer is touched; trainer
/// failures propagate unchanged. No retries — a failed run is re-triggered
/// by the caller.
pub async fn train<T: SpeechTrainer>(
    trainer: &T,
    dataset: &Path,
    epochs: u32,
    output: &Path,
) -> Result<(), VoiceBoxError> {
    validate_dataset(dataset)?;
    tokio::fs::create_dir_all(output).await?;

    info!(dataset = %dataset.display(), epochs, "Starting training");
    trainer.fit(dataset, epochs, output).await?;
    info!("Training complete");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
