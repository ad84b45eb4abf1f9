//! JSON reporter
//!
//! Outputs the report's plain key/value projection as pretty-printed JSON.
//! This is the same document a narrative generator or dashboard consumes.

use crate::pipeline::AnalysisReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&report.to_dict())?)
}

/// Render report as compact JSON (single line)
pub fn render_compact(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string(&report.to_dict())?)
}
