//! Sentence-aware text chunking for batched synthesis.
//!
//! Long input text is split into batches sized for a single model call.
//! Splits happen on sentence boundaries only: a sentence larger than the
//! whole budget is emitted as its own oversized batch rather than being cut
//! mid-sentence, which would corrupt prosody cues for the downstream model.

use serde::{Deserialize, Serialize};

/// The sentence delimiter batches are split on.
const SENTENCE_DELIMITER: &str = ". ";

/// Characters per word assumed by the [`ChunkUnit::Words`] estimate.
const CHARS_PER_WORD: usize = 5;

// ============================================================================
// Chunk Unit
// ============================================================================

/// Size unit for the chunking budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkUnit {
    /// Exact character count of the running batch.
    Characters,
    /// Estimated word count: character count divided by five.
    ///
    /// This is the batching heuristic the synthesis model was tuned
    /// against. It intentionally over-counts short words and under-counts
    /// long ones.
    #[default]
    Words,
}

impl ChunkUnit {
    /// Measure `text` in this unit.
    pub fn measure(&self, text: &str) -> usize {
        let chars = text.chars().count();
        match self {
            ChunkUnit::Characters => chars,
            ChunkUnit::Words => chars / CHARS_PER_WORD,
        }
    }
}

// ============================================================================
// Split Trigger
// ============================================================================

/// When a running batch is emitted relative to the budget.
///
/// Front-ends size their batches differently, so the comparison is caller
/// policy rather than a fixed rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitTrigger {
    /// Emit once the running size is `>=` the budget.
    Meets,
    /// Emit once the running size is strictly `>` the budget.
    #[default]
    Exceeds,
}

impl SplitTrigger {
    /// Whether a batch of `size` should be emitted under `budget`.
    pub fn fires(&self, size: usize, budget: usize) -> bool {
        match self {
            SplitTrigger::Meets => size >= budget,
            SplitTrigger::Exceeds => size > budget,
        }
    }
}

// ============================================================================
// Chunker Configuration
// ============================================================================

/// Configuration for [`chunk_text`].
///
/// ## Examples
///
/// ```
/// use voicebox_lib::chunker::{ChunkerConfig, ChunkUnit};
///
/// let config = ChunkerConfig::new(30).with_unit(ChunkUnit::Characters);
/// assert_eq!(config.budget(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    budget: usize,
    unit: ChunkUnit,
    trigger: SplitTrigger,
}

impl ChunkerConfig {
    /// Create a config with the given size budget (clamped to at least 1).
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
            unit: ChunkUnit::default(),
            trigger: SplitTrigger::default(),
        }
    }

    /// Set the size unit.
    #[must_use]
    pub fn with_unit(mut self, unit: ChunkUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the split trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger: SplitTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// The size budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// The size unit.
    pub fn unit(&self) -> ChunkUnit {
        self.unit
    }

    /// The split trigger.
    pub fn trigger(&self) -> SplitTrigger {
        self.trigger
    }

    fn should_emit(&self, batch: &str) -> bool {
        self.trigger.fires(self.unit.measure(batch), self.budget)
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        // Matches the default batch size of the HTTP form front-end.
        Self::new(30)
    }
}

// ============================================================================
// Chunking
// ============================================================================

/// Split `text` into an ordered sequence of synthesis-sized batches.
///
/// Newlines are normalized to spaces, the text is split on `". "`, and
/// sentences are accumulated into a running batch that is emitted once the
/// configured trigger fires against the budget. A non-empty remainder
/// becomes the final batch. The sentence delimiter is restored on
/// accumulated sentences, so a final sentence without a trailing period
/// gains one.
///
/// Guarantees:
/// - no returned batch is empty;
/// - a single sentence over the budget is emitted whole, never truncated;
/// - empty or whitespace-only input yields an empty sequence (callers must
///   report this, not treat it as success).
pub fn chunk_text(text: &str, config: &ChunkerConfig) -> Vec<String> {
    let normalized = text.replace(['\r', '\n'], " ");

    let mut batches = Vec::new();
    let mut current = String::new();

    for piece in normalized.split(SENTENCE_DELIMITER) {
        let sentence = piece.trim();
        if sentence.is_empty() {
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
        if !sentence.ends_with('.') {
            current.push('.');
        }
        if config.should_emit(&current) {
            batches.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

// ============================================================================
// Tests
// ============================================================================
