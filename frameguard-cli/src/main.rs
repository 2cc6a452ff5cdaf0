//! Frameguard CLI - per-frame video tamper evidence tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;

#[derive(Parser)]
#[command(name = "frameguard")]
#[command(author, version, about = "Per-frame video tamper evidence", long_about = None)]
struct Cli {
    /// Suppress decorative output (keys and verdicts still print)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fingerprint a video into a manifest and write its marked copy
    Ingest {
        /// Path to the video to ingest
        #[arg(value_name = "VIDEO")]
        video: PathBuf,

        /// Output path for the marked copy (defaults to marked_<VIDEO>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for the manifest (defaults to <VIDEO>.manifest)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Reconcile a candidate video against a stored manifest
    Verify {
        /// Path to the candidate video
        #[arg(value_name = "VIDEO")]
        video: PathBuf,

        /// Path to the manifest file (defaults to <VIDEO>.manifest)
        #[arg(value_name = "MANIFEST")]
        manifest: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest {
            video,
            output,
            manifest,
        } => commands::ingest::execute(video, output, manifest, cli.quiet),
        Commands::Verify { video, manifest } => {
            commands::verify::execute(video, manifest, cli.quiet)
        }
    };

    if let Err(err) = result {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(exit_codes::ExitCode::from_anyhow(&err).code);
    }
}
