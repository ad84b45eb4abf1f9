//! Analysis pipeline
//!
//! Validates a snapshot, runs the four analyzers and composes one report:
//!
//! ```text
//!                         ┌──► ArchitectureAnalyzer ──┐
//!                         ├──► QualityAnalyzer ───────┤
//! RepoSnapshot ─ validate ┤                           ├──► AnalysisReport
//!                         ├──► PrincipleEvaluator ────┤
//!                         └──► CollaborationAnalyzer ─┘
//!
//! overall = quality * 0.40 + principles * 0.35 + collaboration * 0.25   (default weights)
//! ```
//!
//! The analyzers share nothing but the immutable snapshot, so the parallel
//! path is a plain `rayon::join`. A report is only built once all four have
//! returned.

mod ports;

pub use ports::{JsonFileSink, JsonFileSource, ReportSink, SnapshotSource};

use crate::analyzer::Analyzer;
use crate::collaboration::{CollaborationAnalyzer, CollaborationMetrics};
use crate::config::{EngineConfig, ScoreWeights};
use crate::detectors::{ArchitectureAnalysisResult, ArchitectureAnalyzer};
use crate::models::{round1, RepoSnapshot, SnapshotError};
use crate::principles::{PrincipleEvaluationResult, PrincipleEvaluator};
use crate::quality::{QualityAnalyzer, QualityMetrics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Version of the scoring contract (weights and thresholds)
pub const SCORING_VERSION: &str = "1.0";

/// Tag of reports blended with configured, non-default weights
pub const CUSTOM_SCORING_VERSION: &str = "1.0+custom";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("failed to build analysis thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Repository facts carried alongside the scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub url: String,
    pub description: Option<String>,
    pub primary_language: Option<String>,
    /// Language share in percent
    pub languages: BTreeMap<String, f64>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub total_files: usize,
    pub total_directories: usize,
    pub total_commits: usize,
    pub total_contributors: usize,
    pub created_at: Option<DateTime<Utc>>,
}

impl RepositorySummary {
    pub fn from_snapshot(snapshot: &RepoSnapshot) -> Self {
        Self {
            full_name: snapshot.full_name(),
            url: snapshot.url.clone(),
            description: snapshot.description.clone(),
            primary_language: snapshot.primary_language.clone(),
            languages: snapshot.language_distribution(),
            stars: snapshot.stars,
            forks: snapshot.forks,
            open_issues: snapshot.open_issues,
            total_files: snapshot.total_files(),
            total_directories: snapshot.total_directories(),
            total_commits: snapshot.commits.len(),
            total_contributors: snapshot.contributors.len(),
            created_at: snapshot.created_at,
        }
    }
}

/// The four analyzer payloads handed to a narrative generator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightPayload {
    pub architecture_data: serde_json::Value,
    pub quality_data: serde_json::Value,
    pub principles_data: serde_json::Value,
    pub collaboration_data: serde_json::Value,
}

/// Complete result bundle for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub repository: RepositorySummary,
    pub architecture: ArchitectureAnalysisResult,
    pub quality: QualityMetrics,
    pub principles: PrincipleEvaluationResult,
    pub collaboration: CollaborationMetrics,
    pub overall_score: f64,
    /// Confidence of the primary pattern, 0 when none was detected
    pub architecture_score: f64,
    /// Weights the overall score was blended with
    pub weights: ScoreWeights,
    pub scoring_version: &'static str,
}

impl AnalysisReport {
    /// A ≥90, B ≥80, C ≥70, D ≥60, else F
    pub fn overall_grade(&self) -> &'static str {
        let score = self.overall_score;
        if score >= 90.0 {
            "A"
        } else if score >= 80.0 {
            "B"
        } else if score >= 70.0 {
            "C"
        } else if score >= 60.0 {
            "D"
        } else {
            "F"
        }
    }

    pub fn insight_payload(&self) -> InsightPayload {
        InsightPayload {
            architecture_data: self.architecture.to_dict(),
            quality_data: self.quality.to_dict(),
            principles_data: self.principles.to_dict(),
            collaboration_data: self.collaboration.to_dict(),
        }
    }

    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "repository": self.repository,
            "scoring_version": self.scoring_version,
            "weights": {
                "quality": self.weights.quality,
                "principles": self.weights.principles,
                "collaboration": self.weights.collaboration,
            },
            "overall_score": round1(self.overall_score),
            "overall_grade": self.overall_grade(),
            "architecture_score": round1(self.architecture_score),
            "architecture": self.architecture.to_dict(),
            "quality": self.quality.to_dict(),
            "principles": self.principles.to_dict(),
            "collaboration": self.collaboration.to_dict(),
        })
    }
}

/// Blend the three scalar scores
pub fn overall_score(
    weights: &ScoreWeights,
    quality: f64,
    principles: f64,
    collaboration: f64,
) -> f64 {
    quality * weights.quality + principles * weights.principles + collaboration * weights.collaboration
}

/// Version tag for a report blended with `weights`
pub fn scoring_version(weights: &ScoreWeights) -> &'static str {
    if weights.is_default() {
        SCORING_VERSION
    } else {
        CUSTOM_SCORING_VERSION
    }
}

type AnalyzerOutputs = (
    ArchitectureAnalysisResult,
    QualityMetrics,
    PrincipleEvaluationResult,
    CollaborationMetrics,
);

/// Runs every analyzer over one snapshot
pub struct AnalysisPipeline {
    architecture: ArchitectureAnalyzer,
    quality: QualityAnalyzer,
    principles: PrincipleEvaluator,
    collaboration: CollaborationAnalyzer,
    config: EngineConfig,
}

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            architecture: ArchitectureAnalyzer::new(),
            quality: QualityAnalyzer::new(),
            principles: PrincipleEvaluator::new(),
            collaboration: CollaborationAnalyzer::new(),
            config: config.sanitize(),
        }
    }

    /// Pin the clock used for commit frequency
    pub fn with_reference_time(mut self, as_of: DateTime<Utc>) -> Self {
        self.collaboration = CollaborationAnalyzer::with_reference_time(as_of);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load from a source, then analyze
    pub fn run_source(&self, source: &dyn SnapshotSource) -> Result<AnalysisReport, AnalysisError> {
        let snapshot = source.load()?;
        self.run(&snapshot)
    }

    /// Validate and analyze one snapshot
    pub fn run(&self, snapshot: &RepoSnapshot) -> Result<AnalysisReport, AnalysisError> {
        snapshot.validate()?;
        let start = Instant::now();

        let outputs = if !self.config.execution.parallel {
            self.run_sequential(snapshot)
        } else if let Some(workers) = self.config.execution.workers {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?;
            pool.install(|| self.run_parallel(snapshot))
        } else {
            self.run_parallel(snapshot)
        };

        let report = self.compose(snapshot, outputs);
        info!(
            "Analyzed {} in {:?}: overall {:.1} ({})",
            report.repository.full_name,
            start.elapsed(),
            report.overall_score,
            report.overall_grade()
        );
        Ok(report)
    }

    fn run_sequential(&self, snapshot: &RepoSnapshot) -> AnalyzerOutputs {
        debug!(
            "Running analyzers sequentially: {}, {}, {}, {}",
            self.architecture.name(),
            self.quality.name(),
            self.principles.name(),
            self.collaboration.name()
        );
        (
            self.architecture.analyze(snapshot),
            self.quality.analyze(snapshot),
            self.principles.analyze(snapshot),
            self.collaboration.analyze(snapshot),
        )
    }

    fn run_parallel(&self, snapshot: &RepoSnapshot) -> AnalyzerOutputs {
        debug!("Running analyzers in parallel");
        let ((architecture, quality), (principles, collaboration)) = rayon::join(
            || {
                rayon::join(
                    || self.architecture.analyze(snapshot),
                    || self.quality.analyze(snapshot),
                )
            },
            || {
                rayon::join(
                    || self.principles.analyze(snapshot),
                    || self.collaboration.analyze(snapshot),
                )
            },
        );
        (architecture, quality, principles, collaboration)
    }

    fn compose(&self, snapshot: &RepoSnapshot, outputs: AnalyzerOutputs) -> AnalysisReport {
        let (architecture, quality, principles, collaboration) = outputs;

        let weights = self.config.scoring.weights.clone();
        let overall = overall_score(
            &weights,
            quality.overall_quality_score,
            principles.principle_score,
            collaboration.collaboration_score,
        );

        AnalysisReport {
            repository: RepositorySummary::from_snapshot(snapshot),
            architecture_score: architecture.architecture_score(),
            architecture,
            quality,
            principles,
            collaboration,
            overall_score: overall,
            scoring_version: scoring_version(&weights),
            weights,
        }
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}
