//! repoinsight - Heuristic repository analysis
//!
//! Scores a normalized repository snapshot (file tree, bounded commit
//! history, contributor roster) along four axes without reading file
//! contents: architecture pattern, code quality, design principles and
//! collaboration health.
//!
//! ```no_run
//! use repoinsight::{AnalysisPipeline, RepoSnapshot};
//!
//! let snapshot = RepoSnapshot::from_json(&std::fs::read_to_string("snapshot.json")?)?;
//! let report = AnalysisPipeline::new().run(&snapshot)?;
//! println!("{} scored {:.1}", report.repository.full_name, report.overall_score);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analyzer;
pub mod cli;
pub mod collaboration;
pub mod config;
pub mod detectors;
pub mod models;
pub mod pipeline;
pub mod principles;
pub mod quality;
pub mod reporters;

pub use analyzer::Analyzer;
pub use config::EngineConfig;
pub use models::{
    CommitEntry, ContributorEntry, FileEntry, FileKind, RepoSnapshot, Severity, SnapshotError,
    Violation,
};
pub use pipeline::{
    AnalysisError, AnalysisPipeline, AnalysisReport, CUSTOM_SCORING_VERSION, SCORING_VERSION,
};
