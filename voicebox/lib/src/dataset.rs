//! Utterance dataset generation.
//!
//! One run produces `run_<ts>/wavs/utt_<i>.wav` per phrase plus a
//! `metadata.csv` index in the `relative_path|transcript|transcript`
//! format the fine-tuning trainer consumes. Metadata rows are appended as
//! utterances are written, so a failed run keeps everything generated up
//! to the failure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::audio::write_wav;
use crate::errors::VoiceBoxError;
use crate::traits::SpeechModel;
use crate::types::{RunDirectory, SynthesisOptions};

/// Name of the metadata index inside a dataset run folder.
pub const METADATA_FILE: &str = "metadata.csv";

/// Name of the audio subdirectory inside a dataset run folder.
pub const WAVS_DIR: &str = "wavs";

// ============================================================================
// Dataset Entry
// ============================================================================

/// One row of `metadata.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Audio path relative to the run folder (`wavs/utt_<i>.wav`).
    pub audio: String,
    /// The utterance text.
    pub transcript: String,
}

impl DatasetEntry {
    /// Render the `audio|transcript|transcript` metadata line.
    pub fn metadata_line(&self) -> String {
        format!("{}|{}|{}", self.audio, self.transcript, self.transcript)
    }
}

/// A completed dataset generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRun {
    /// The run folder holding `wavs/` and `metadata.csv`.
    pub root: PathBuf,
    /// Entries in generation order.
    pub entries: Vec<DatasetEntry>,
}

// ============================================================================
// Generation
// ============================================================================

/// Generate an utterance dataset from `phrases` under `runs_root`.
///
/// ## Errors
///
/// An empty phrase list is refused before any filesystem work. The first
/// failed model call aborts the run with
/// [`VoiceBoxError::GenerationFailed`]; utterances and metadata rows
/// already written stay on disk.
pub async fn generate_dataset<M: SpeechModel>(
    model: &M,
    phrases: &[String],
    options: &SynthesisOptions,
    runs_root: &Path,
) -> Result<DatasetRun, VoiceBoxError> {
    if phrases.is_empty() {
        return Err(VoiceBoxError::EmptyPhraseList);
    }

    let run = RunDirectory::create(runs_root)?;
    let wavs_dir = run.path().join(WAVS_DIR);
    tokio::fs::create_dir_all(&wavs_dir).await?;

    info!(run = %run.path().display(), utterances = phrases.len(), "Generating dataset");

    let mut metadata = tokio::fs::File::create(run.path().join(METADATA_FILE)).await?;
    let mut entries = Vec::with_capacity(phrases.len());

    for (i, text) in phrases.iter().enumerate() {
        debug!(utterance = i + 1, total = phrases.len(), "Generating utterance");

        let clip = model
            .generate(text, options)
            .await
            .map_err(|e| VoiceBoxError::GenerationFailed {
                index: i,
                source: Box::new(e),
            })?;

        let entry = DatasetEntry {
            audio: format!("{WAVS_DIR}/utt_{i}.wav"),
            transcript: text.clone(),
        };
        write_wav(&clip, &wavs_dir.join(format!("utt_{i}.wav")))?;
        metadata
            .write_all(format!("{}\n", entry.metadata_line()).as_bytes())
            .await?;
        entries.push(entry);
    }

    metadata.flush().await?;
    info!(run = %run.path().display(), "Dataset generation completed");

    Ok(DatasetRun {
        root: run.into_path(),
        entries,
    })
}

// ============================================================================
// Tests
// ============================================================================
