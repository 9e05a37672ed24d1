//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod extract;
mod process;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use legalytics::{AnnotationStrategy, Config};

#[derive(Parser)]
#[command(name = "legalytics")]
#[command(about = "Fact extraction and analytics for Indonesian legal documents")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Annotation strategy: none, ner, or llm_insight (overrides config)
    #[arg(long, global = true, env = "LEGALYTICS_STRATEGY")]
    strategy: Option<String>,

    /// Number of word-cloud entries (overrides config)
    #[arg(long, global = true)]
    top_k: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Build the analytics payload for a document
    Process {
        /// Document ID in the index
        document_id: String,
    },

    /// Print the per-block fact records of a document
    Records {
        /// Document ID in the index
        document_id: String,
    },

    /// Run the pattern extractors on a text file or stdin
    Extract {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Load config from an explicit path or by discovery, then apply CLI overrides.
async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(path)
            .await
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().await,
    };
    if let Some(ref path) = config.source_path {
        info!("Loaded config from {}", path.display());
    }

    if let Some(ref strategy) = cli.strategy {
        config.annotation.strategy = AnnotationStrategy::parse(strategy).with_context(|| {
            format!(
                "unknown strategy '{}' (expected none, ner or llm_insight)",
                strategy
            )
        })?;
    }
    if let Some(top_k) = cli.top_k {
        config.aggregation.top_k = top_k;
    }
    Ok(config)
}

/// Serialize a value for stdout.
fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process { ref document_id } => {
            let config = load_config(&cli).await?;
            process::cmd_process(config, document_id, cli.pretty).await
        }
        Commands::Records { ref document_id } => {
            let config = load_config(&cli).await?;
            process::cmd_records(config, document_id, cli.pretty).await
        }
        Commands::Extract { ref file } => extract::cmd_extract(file.as_deref(), cli.pretty).await,
    }
}
