//! Analyze command - score a snapshot and render the report

use crate::config::{load_config, load_config_file, EngineConfig};
use crate::pipeline::{AnalysisPipeline, JsonFileSource};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Flags of `repoinsight analyze`
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub snapshot: PathBuf,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub sequential: bool,
    pub workers: Option<usize>,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let config = resolve_config(&options)?;
    let format = resolve_format(options.format.as_deref(), &config)?;

    let source = JsonFileSource::new(&options.snapshot);
    let pipeline = AnalysisPipeline::with_config(config);
    let report = pipeline
        .run_source(&source)
        .with_context(|| format!("Failed to analyze {}", options.snapshot.display()))?;

    let rendered = reporters::report_with_format(&report, format)?;

    match &options.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Explicit `--config` wins over the working directory's config file and
/// must load cleanly; command-line scheduling flags win over both
fn resolve_config(options: &AnalyzeOptions) -> Result<EngineConfig> {
    let mut config = match &options.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(&current_dir()),
    };

    if options.sequential {
        config.execution.parallel = false;
    }
    if let Some(workers) = options.workers {
        config.execution.workers = Some(workers);
    }
    Ok(config)
}

fn resolve_format(flag: Option<&str>, config: &EngineConfig) -> Result<OutputFormat> {
    let name = flag
        .or(config.defaults.format.as_deref())
        .unwrap_or("text");
    OutputFormat::from_str(name)
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf())
}
