//! chemsim command line interface.
//!
//! `calculate` runs the pairwise similarity pipeline against an
//! embedding model export and writes the gzipped edge list; `vocab`
//! previews which identifiers a prefix selection would pick up.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Pairwise cosine similarity tables for chemical entity embeddings.
#[derive(Parser)]
#[command(name = "chemsim")]
#[command(version = chemsim_core::constants::VERSION)]
#[command(about = "Compute pairwise similarities between chemical embedding vectors")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the pairwise similarity table.
    Calculate {
        /// Embedding model export (TSV, optionally gzipped).
        #[arg(long)]
        model: PathBuf,

        /// Destination for the gzipped edge list.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Minimum cosine similarity cutoff; values <= cutoff are dropped.
        #[arg(long)]
        cutoff: Option<f64>,

        /// Decimal places for emitted similarities.
        #[arg(long)]
        precision: Option<u32>,

        /// Identifier prefix to select (repeatable; defaults to the
        /// chemical prefixes).
        #[arg(long = "prefix")]
        prefixes: Vec<String>,

        /// Condensed-index chunk size for parallel computation;
        /// 0 runs sequentially.
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Optional TOML config file; CLI flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the report datasets
        /// (similarity_hist.json, degree_distribution.json).
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
    /// Show which identifiers a prefix selection picks up.
    Vocab {
        /// Embedding model export (TSV, optionally gzipped).
        #[arg(long)]
        model: PathBuf,

        /// Identifier prefix to select (repeatable).
        #[arg(long = "prefix")]
        prefixes: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Calculate {
            model,
            output,
            cutoff,
            precision,
            prefixes,
            chunk_size,
            config,
            report_dir,
        } => commands::calculate(commands::CalculateArgs {
            model,
            output,
            cutoff,
            precision,
            prefixes,
            chunk_size,
            config,
            report_dir,
        }),
        Commands::Vocab { model, prefixes } => commands::vocab(&model, &prefixes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
