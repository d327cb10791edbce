//! Phrase list loading for dataset generation.

use std::path::Path;

use tracing::info;

use crate::errors::VoiceBoxError;

/// Replace curly apostrophes with the plain ASCII one.
///
/// Phrase lists and pasted text routinely carry U+2018/U+2019, which the
/// downstream tokenizers treat as unknown symbols.
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}'], "'")
}

/// Load a phrase list: one utterance per line, blanks dropped, quotes
/// normalized.
///
/// ## Errors
///
/// Returns [`VoiceBoxError::PhraseListMissing`] when the file does not
/// exist or yields no usable lines; callers report this before any
/// generation work starts.
pub async fn load_phrases(path: &Path) -> Result<Vec<String>, VoiceBoxError> {
    if !path.exists() {
        return Err(VoiceBoxError::PhraseListMissing {
            path: path.to_path_buf(),
        });
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let phrases: Vec<String> = raw
        .lines()
        .map(|line| normalize_quotes(line.trim()))
        .filter(|line| !line.is_empty())
        .collect();

    if phrases.is_empty() {
        return Err(VoiceBoxError::PhraseListMissing {
            path: path.to_path_buf(),
        });
    }

    info!(count = phrases.len(), path = %path.display(), "Loaded phrase list");
    Ok(phrases)
}

// ============================================================================
// Tests
// ============================================================================
