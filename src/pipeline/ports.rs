//! Collaborator ports
//!
//! Ingestion and persistence live outside the engine. These traits are the
//! seams; the JSON file implementations back the CLI.

use crate::models::{RepoSnapshot, SnapshotError};
use crate::pipeline::AnalysisReport;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces a snapshot for analysis
pub trait SnapshotSource {
    fn load(&self) -> Result<RepoSnapshot, SnapshotError>;
}

/// Persists a finished report
pub trait ReportSink {
    fn persist(&self, report: &AnalysisReport) -> anyhow::Result<()>;
}

/// Reads a snapshot JSON document from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self) -> Result<RepoSnapshot, SnapshotError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SnapshotError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!("Read {} bytes from {}", content.len(), self.path.display());
        RepoSnapshot::from_json(&content)
    }
}

/// Source for a snapshot already in memory
impl SnapshotSource for RepoSnapshot {
    fn load(&self) -> Result<RepoSnapshot, SnapshotError> {
        self.validate()?;
        Ok(self.clone())
    }
}

/// Writes the report's plain key/value projection as pretty JSON
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonFileSink {
    fn persist(&self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&report.to_dict())?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write report to {}", self.path.display()))?;
        debug!("Report written to {}", self.path.display());
        Ok(())
    }
}
