//! VoiceBox CLI - dataset generation, fine-tuning and speech synthesis

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voicebox_lib::{
    BatchOutcome, CancelToken, ChatterboxEngine, ChunkUnit, ChunkerConfig, CoquiTrainer, Engine,
    PipelineConfig, SynthesisOptions, SynthesisRequest, VoiceBoxError, generate_dataset,
    load_phrases, run_pipeline, synthesize, synthesize_batched, train,
};

/// Training output directory; also where the fine-tuned artifacts live.
const OUTPUT_DIR: &str = "tts_output";

#[derive(Parser)]
#[command(name = "voicebox")]
#[command(about = "Dataset generation, fine-tuning and speech synthesis around a pretrained TTS model", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize speech from text (reads stdin when no text is given)
    Say {
        /// Text to synthesize
        text: Vec<String>,

        /// Synthesize a text file in sentence-aligned batches
        #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Reference audio clip for voice cloning
        #[arg(long = "ref", value_name = "WAV")]
        reference: Option<PathBuf>,

        /// Batch size budget for chunked synthesis
        #[arg(short, long, default_value_t = 30)]
        batch_size: usize,

        /// Unit the batch budget is measured in
        #[arg(long, value_enum, default_value_t = UnitArg::Words)]
        unit: UnitArg,

        /// Expressiveness of the generated speech (0.0-1.0)
        #[arg(long, default_value_t = 0.5)]
        exaggeration: f32,

        /// Classifier-free guidance weight (0.0-1.0)
        #[arg(long, default_value_t = 0.5)]
        cfg_weight: f32,

        /// Output path for single-shot synthesis
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Root directory for batched run output
        #[arg(long, value_name = "DIR", default_value = "output")]
        output_dir: PathBuf,
    },

    /// Generate an utterance dataset from a phrase list
    Dataset {
        /// Phrase list file, one utterance per line
        #[arg(short, long, value_name = "FILE", default_value = "phonic_lines.txt")]
        phrases: PathBuf,

        /// Reference audio clip for voice cloning
        #[arg(long = "ref", value_name = "WAV")]
        reference: Option<PathBuf>,

        /// Root directory for dataset runs
        #[arg(long, value_name = "DIR", default_value = "runs")]
        output_dir: PathBuf,
    },

    /// Fine-tune a model on a generated dataset
    Train {
        /// Dataset run folder (holds wavs/ and metadata.csv)
        #[arg(short, long, value_name = "DIR")]
        dataset: PathBuf,

        /// Number of training epochs
        #[arg(short, long, default_value_t = 50)]
        epochs: u32,

        /// Training output directory
        #[arg(short, long, value_name = "DIR", default_value = OUTPUT_DIR)]
        output: PathBuf,
    },

    /// Run dataset generation, training and a check synthesis end to end
    Pipeline {
        /// Existing dataset folder (generated from the phrase list when omitted)
        #[arg(long, value_name = "DIR")]
        dataset: Option<PathBuf>,

        /// Phrase list used when no dataset is provided
        #[arg(long, value_name = "FILE", default_value = "phonic_lines.txt")]
        phrases: PathBuf,

        /// Number of training epochs
        #[arg(short, long, default_value_t = 50)]
        epochs: u32,

        /// Text synthesized after training
        #[arg(long, default_value = "This is a test of the trained model.")]
        text: String,

        /// Reference audio clip for voice cloning during dataset generation
        #[arg(long = "ref", value_name = "WAV")]
        reference: Option<PathBuf>,
    },
}

/// Chunking unit exposed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum UnitArg {
    /// Character count
    Chars,
    /// Estimated word count
    Words,
}

impl From<UnitArg> for ChunkUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Chars => ChunkUnit::Characters,
            UnitArg::Words => ChunkUnit::Words,
        }
    }
}

/// Joins multiple arguments into a single string with spaces
fn join_args(args: Vec<String>) -> String {
    args.join(" ")
}

/// Reads text from stdin with a 10,000 character limit
fn read_from_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    let mut handle = io::stdin().take(10_000);
    handle.read_to_string(&mut buffer)?;
    let text = buffer.trim().to_string();

    if text.is_empty() {
        eprintln!("Error: No input provided");
        eprintln!("Usage: voicebox say <text> or echo \"text\" | voicebox say");
        std::process::exit(1);
    }

    Ok(text)
}

fn init_logging(verbosity: u8, json: bool) {
    let base_filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_new(base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        // JSON output for structured log processing
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable console output to stderr
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Pick the synthesis engine.
///
/// A voice-clone reference needs the pretrained engine; otherwise a
/// fine-tuned model is preferred when its artifacts exist.
fn pick_engine(reference: Option<&Path>) -> Engine {
    if reference.is_some() {
        Engine::Chatterbox(ChatterboxEngine::new())
    } else {
        Engine::select(Path::new(OUTPUT_DIR))
    }
}

fn build_options(
    reference: Option<&Path>,
    exaggeration: f32,
    cfg_weight: f32,
) -> SynthesisOptions {
    let mut options = SynthesisOptions::new()
        .with_exaggeration(exaggeration)
        .with_cfg_weight(cfg_weight);
    if let Some(reference) = reference {
        options = options.with_audio_prompt(reference);
    }
    options
}

/// Wire Ctrl-C to a cancellation token for long batch runs.
fn cancel_on_ctrl_c() -> CancelToken {
    let cancel = CancelToken::new();
    let handler = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handler.cancel();
        }
    });
    cancel
}

async fn run(command: Commands) -> Result<(), VoiceBoxError> {
    match command {
        Commands::Say {
            text,
            file,
            reference,
            batch_size,
            unit,
            exaggeration,
            cfg_weight,
            out,
            output_dir,
        } => {
            let options = build_options(reference.as_deref(), exaggeration, cfg_weight);
            let engine = pick_engine(reference.as_deref());

            if let Some(file) = file {
                let contents = tokio::fs::read_to_string(&file).await?;
                let chunker = ChunkerConfig::new(batch_size).with_unit(unit.into());
                let cancel = cancel_on_ctrl_c();
                let outcome = synthesize_batched(
                    &engine,
                    &contents,
                    &chunker,
                    &options,
                    &output_dir,
                    &cancel,
                )
                .await?;
                match outcome {
                    BatchOutcome::Completed {
                        run_dir, batches, ..
                    } => {
                        println!("✅ Generated {batches} batches in {}", run_dir.display());
                    }
                    BatchOutcome::Stopped {
                        run_dir,
                        batches_written,
                    } => {
                        println!(
                            "Generation stopped after {batches_written} batches in {}",
                            run_dir.display()
                        );
                    }
                }
            } else {
                let message = if text.is_empty() {
                    // No arguments provided, read from stdin
                    read_from_stdin()?
                } else {
                    join_args(text)
                };
                let mut request = SynthesisRequest::new(message).with_options(options);
                if let Some(out) = out {
                    request = request.with_output(out);
                }
                let written = synthesize(&engine, &request).await?;
                println!("✅ Audio written to {}", written.display());
            }
        }

        Commands::Dataset {
            phrases,
            reference,
            output_dir,
        } => {
            let list = load_phrases(&phrases).await?;
            let options = build_options(reference.as_deref(), 0.5, 0.5);
            let engine = ChatterboxEngine::new();
            let run = generate_dataset(&engine, &list, &options, &output_dir).await?;
            println!("✅ Dataset generated in {}", run.root.display());
        }

        Commands::Train {
            dataset,
            epochs,
            output,
        } => {
            let trainer = CoquiTrainer::new();
            train(&trainer, &dataset, epochs, &output).await?;
            println!("✅ Training complete.");
        }

        Commands::Pipeline {
            dataset,
            phrases,
            epochs,
            text,
            reference,
        } => {
            let mut config = PipelineConfig::new()
                .with_phrases_file(phrases)
                .with_epochs(epochs)
                .with_text(text)
                .with_options(build_options(reference.as_deref(), 0.5, 0.5));
            if let Some(dataset) = dataset {
                config = config.with_dataset(dataset);
            }

            let engine = ChatterboxEngine::new();
            let trainer = CoquiTrainer::new();
            let report = run_pipeline(&engine, &trainer, &config).await?;
            println!("✅ Pipeline complete.");
            println!("   dataset: {}", report.dataset_dir.display());
            println!("   audio:   {}", report.audio_output.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_verbosity, cli.json);

    if let Err(e) = run(cli.command).await {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
