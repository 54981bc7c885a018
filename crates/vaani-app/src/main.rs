use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod profile;
pub mod state;

use self::state::AppState;

const DEFAULT_LOG_FILTER: &str =
    "warn,vaani=info,vaani_translator=info,vaani_opus_mt=info,vaani_speech=info";

/// Vaani - translate phrases, synthesize speech and score pronunciation
#[derive(Parser)]
#[command(name = "vaani")]
#[command(about = "Translate phrases, synthesize speech and score pronunciation", long_about = None)]
struct Cli {
    /// JSON config file (default: ./vaani.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported languages and translation pairs
    Languages,
    /// Translate a phrase
    Translate {
        text: String,
        #[arg(short, long)]
        source: String,
        #[arg(short, long)]
        target: String,
    },
    /// Score a pronunciation attempt against a reference phrase
    Score {
        #[arg(short, long)]
        reference: String,
        /// Recognized text of the attempt
        #[arg(short, long, conflicts_with = "audio", required_unless_present = "audio")]
        attempt: Option<String>,
        /// Recorded attempt, transcribed before scoring
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,
        #[arg(short, long, default_value = "en")]
        language: String,
    },
    /// Synthesize speech to an MP3 file
    Speak {
        text: String,
        #[arg(short, long)]
        language: String,
        #[arg(short, long, default_value = "speech.mp3")]
        output: PathBuf,
    },
    /// Transcribe an audio file
    Transcribe {
        #[arg(value_name = "FILE")]
        audio: PathBuf,
        #[arg(short, long, default_value = "en")]
        language: String,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Results go to stdout, logs to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = profile::load_config(cli.config.as_deref())?;
    let state = AppState::new(config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            ctrl_c.cancel();
        }
    });

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("request", %request_id);

    let output = run(&state, cli.command, &cancel).instrument(span).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Time-box one command and abandon it on Ctrl-C
pub async fn run(
    state: &AppState,
    command: Commands,
    cancel: &CancellationToken,
) -> anyhow::Result<serde_json::Value> {
    let timeout = state.request_timeout();

    tokio::select! {
        _ = cancel.cancelled() => Err(anyhow!("cancelled")),
        result = tokio::time::timeout(timeout, commands::execute(state, command)) => {
            match result {
                Ok(output) => output,
                Err(_) => {
                    tracing::warn!(timeout_secs = timeout.as_secs(), "request timed out");
                    Err(anyhow!("request timed out after {}s", timeout.as_secs()))
                }
            }
        }
    }
}
