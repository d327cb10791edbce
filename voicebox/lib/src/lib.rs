//! VoiceBox
//!
//! Dataset generation, fine-tuning hand-off and speech synthesis around a
//! pretrained text-to-speech model.
//!
//! ## Features
//!
//! - **Sentence-aware chunking**: long text is batched on sentence
//!   boundaries under a character or word budget, never mid-sentence
//! - **Dataset generation**: one wav + metadata row per phrase, in the
//!   `wavs/… | transcript | transcript` layout the trainer consumes
//! - **Cooperative cancellation**: batched runs stop cleanly between
//!   batches via a [`CancelToken`]
//! - **Subprocess engines**: the acoustic model and trainer stay external;
//!   the library shells out and reads the audio back
//! - **Async-first**: built on tokio for non-blocking subprocess and file
//!   work
//!
//! ## Quick Start
//!
//! ```ignore
//! use voicebox_lib::{ChatterboxEngine, SynthesisRequest, synthesize};
//!
//! let engine = ChatterboxEngine::new();
//! let request = SynthesisRequest::new("Hello, world!");
//! let path = synthesize(&engine, &request).await?;
//! ```
//!
//! ## Module Structure
//!
//! - [`chunker`] - sentence-aware text chunking for batched synthesis
//! - [`types`] - core data model (clips, requests, run directories)
//! - [`errors`] - error types for generation, training and I/O
//! - [`traits`] - the `SpeechModel` and `SpeechTrainer` seams
//! - [`engines`] - subprocess-backed model and trainer implementations
//! - [`dataset`] / [`training`] / [`synthesis`] / [`pipeline`] - the
//!   operations wired together by the CLI

pub mod audio;
pub mod cancel;
pub mod chunker;
pub mod dataset;
pub mod engines;
pub mod errors;
pub mod phrases;
pub mod pipeline;
pub mod synthesis;
pub mod training;
pub mod traits;
pub mod types;

// Re-export main types at crate root for convenience
pub use audio::{read_wav, write_wav};
pub use cancel::CancelToken;
pub use chunker::{ChunkUnit, ChunkerConfig, SplitTrigger, chunk_text};
pub use dataset::{DatasetEntry, DatasetRun, generate_dataset};
pub use engines::{ChatterboxEngine, CoquiEngine, CoquiTrainer, Engine};
pub use errors::VoiceBoxError;
pub use phrases::{load_phrases, normalize_quotes};
pub use pipeline::{PipelineConfig, PipelineReport, run_pipeline};
pub use synthesis::{BatchOutcome, synthesize, synthesize_batched};
pub use training::{train, validate_dataset};
pub use traits::{SpeechModel, SpeechTrainer};
pub use types::{AudioClip, RunDirectory, SynthesisOptions, SynthesisRequest};
