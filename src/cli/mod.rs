//! CLI command definitions and handlers

mod analyze;
mod init;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > crate::config::MAX_WORKERS {
        Err(format!("workers cannot exceed {}", crate::config::MAX_WORKERS))
    } else {
        Ok(n)
    }
}

/// repoinsight - Heuristic repository analysis
///
/// Scores architecture, code quality, design principles and collaboration
/// health from a repository snapshot.
#[derive(Parser, Debug)]
#[command(name = "repoinsight")]
#[command(
    version,
    about = "Heuristic repository analysis: architecture, quality, principles and collaboration",
    long_about = "repoinsight reads a normalized repository snapshot (file tree, recent \
commits, contributor roster) and scores it without reading any file contents.\n\n\
Snapshots are JSON documents produced by an ingestion step; see README.md for the format.",
    after_help = "\
Examples:
  repoinsight analyze snapshot.json                  Text report on stdout
  repoinsight analyze snapshot.json --format json    JSON projection for scripting
  repoinsight analyze snapshot.json -f md -o REPORT.md
  repoinsight validate snapshot.json                 Check a snapshot without scoring
  repoinsight init                                   Write a repoinsight.toml template"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64); overrides the config file
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a repository snapshot
    #[command(after_help = "\
Examples:
  repoinsight analyze snapshot.json
  repoinsight analyze snapshot.json --format json -o report.json
  repoinsight analyze snapshot.json --config ci/repoinsight.toml --sequential")]
    Analyze {
        /// Path to the snapshot JSON document
        snapshot: PathBuf,

        /// Output format: text, json, markdown (or md); defaults to the config file, then text
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Config file (default: repoinsight.toml or .repoinsightrc.json in the current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run the analyzers one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Check that a snapshot is well formed without scoring it
    Validate {
        /// Path to the snapshot JSON document
        snapshot: PathBuf,
    },

    /// Initialize a repoinsight.toml config file with example settings
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            snapshot,
            format,
            output,
            config,
            sequential,
        } => analyze::run(analyze::AnalyzeOptions {
            snapshot,
            format,
            output,
            config,
            sequential,
            workers: cli.workers,
        }),

        Commands::Validate { snapshot } => validate::run(&snapshot),

        Commands::Init { path } => init::run(&path),
    }
}
