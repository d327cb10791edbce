use std::path::PathBuf;

/// Errors that can occur during dataset generation, training or synthesis.
///
/// Cancellation is deliberately not represented here: a stopped batch run is
/// an informational outcome (`BatchOutcome::Stopped`), not a failure.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum VoiceBoxError {
    /// The text to synthesize was empty or whitespace-only.
    #[error("No content to synthesize")]
    EmptyText,

    /// A phrase list file was missing or contained no usable lines.
    #[error("Phrase list {} not found or empty", .path.display())]
    PhraseListMissing {
        /// The phrase list that was requested.
        path: PathBuf,
    },

    /// An in-memory phrase list was empty.
    #[error("Phrase list is empty")]
    EmptyPhraseList,

    /// The dataset folder does not exist.
    #[error("Dataset folder {} does not exist", .path.display())]
    DatasetNotFound {
        /// The folder that was requested.
        path: PathBuf,
    },

    /// The dataset folder has no metadata index.
    #[error("metadata.csv not found in {}", .path.display())]
    MetadataMissing {
        /// The dataset folder that was inspected.
        path: PathBuf,
    },

    /// The dataset folder has no `wavs/` directory.
    #[error("wavs folder not found in {}", .path.display())]
    WavsMissing {
        /// The dataset folder that was inspected.
        path: PathBuf,
    },

    /// An engine or trainer binary could not be spawned.
    #[error("Failed to spawn {program}")]
    ProcessSpawnFailed {
        /// The program that could not be started.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// An engine or trainer process exited with a failure status.
    #[error("{program} failed: {stderr}")]
    ProcessFailed {
        /// The program that failed.
        program: String,
        /// Captured diagnostic output.
        stderr: String,
    },

    /// A model call failed while generating one batch or utterance.
    ///
    /// Remaining batches of the run are abandoned; anything already written
    /// to disk is kept.
    #[error("Generation failed for batch {index}")]
    GenerationFailed {
        /// Zero-based index of the batch or utterance that failed.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<VoiceBoxError>,
    },

    /// An audio file could not be read back from an engine.
    #[error("Failed to read audio from {}", .path.display())]
    AudioReadFailed {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying codec error.
        #[source]
        source: hound::Error,
    },

    /// An audio file could not be written.
    #[error("Failed to write audio to {}", .path.display())]
    AudioWriteFailed {
        /// The destination that could not be written.
        path: PathBuf,
        /// The underlying codec error.
        #[source]
        source: hound::Error,
    },

    /// A filesystem operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_message() {
        assert_eq!(VoiceBoxError::EmptyText.to_string(), "No content to synthesize");
    }

    #[test]
    fn test_process_failed_carries_stderr() {
        let err = VoiceBoxError::ProcessFailed {
            program: "chatterbox".into(),
            stderr: "model files missing".into(),
        };
        assert_eq!(err.to_string(), "chatterbox failed: model files missing");
    }

    #[test]
    fn test_generation_failed_preserves_source() {
        use std::error::Error as _;

        let err = VoiceBoxError::GenerationFailed {
            index: 3,
            source: Box::new(VoiceBoxError::EmptyText),
        };
        assert_eq!(err.to_string(), "Generation failed for batch 3");
        assert!(err.source().is_some());
    }
}
