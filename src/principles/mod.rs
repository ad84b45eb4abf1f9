//! Design principle evaluation
//!
//! Pools violations from [`SolidAnalyzer`] and [`CodeSmellDetector`] and
//! blends their scores (SOLID 60%, smells 40%).

mod code_smells;
mod solid;

pub use code_smells::{CodeSmellDetector, SmellReport};
pub use solid::{SolidAnalyzer, SolidReport, DIP_PRINCIPLE, NEUTRAL_SCORE, SRP_PRINCIPLE};

use crate::analyzer::Analyzer;
use crate::models::{round1, RepoSnapshot, Severity, Violation};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

pub const SOLID_WEIGHT: f64 = 0.60;
pub const SMELL_WEIGHT: f64 = 0.40;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrincipleEvaluationResult {
    /// SOLID violations first, then code smells
    pub violations: Vec<Violation>,
    pub principle_score: f64,
    pub solid_scores: IndexMap<String, f64>,
    pub code_smells: Vec<String>,
    pub total_violations: usize,
    pub high_severity_count: usize,
}

impl PrincipleEvaluationResult {
    pub fn grade(&self) -> &'static str {
        let score = self.principle_score;
        match score {
            s if s >= 95.0 => "A+",
            s if s >= 90.0 => "A",
            s if s >= 85.0 => "A-",
            s if s >= 80.0 => "B+",
            s if s >= 75.0 => "B",
            s if s >= 70.0 => "B-",
            s if s >= 65.0 => "C+",
            s if s >= 60.0 => "C",
            _ => "F",
        }
    }

    pub fn quality_level(&self) -> &'static str {
        let score = self.principle_score;
        if score >= 90.0 {
            "Excellent"
        } else if score >= 80.0 {
            "Very Good"
        } else if score >= 70.0 {
            "Good"
        } else if score >= 60.0 {
            "Fair"
        } else {
            "Poor"
        }
    }

    pub fn has_critical_issues(&self) -> bool {
        self.high_severity_count > 0
    }

    pub fn to_dict(&self) -> serde_json::Value {
        let solid_scores: IndexMap<&str, f64> = self
            .solid_scores
            .iter()
            .map(|(k, v)| (k.as_str(), round1(*v)))
            .collect();

        serde_json::json!({
            "principle_score": round1(self.principle_score),
            "grade": self.grade(),
            "quality_level": self.quality_level(),
            "total_violations": self.total_violations,
            "high_severity_count": self.high_severity_count,
            "solid_scores": solid_scores,
            "code_smells": self.code_smells,
            "violations": self.violations,
        })
    }
}

pub struct PrincipleEvaluator {
    solid: SolidAnalyzer,
    smells: CodeSmellDetector,
}

impl PrincipleEvaluator {
    pub fn new() -> Self {
        Self {
            solid: SolidAnalyzer::new(),
            smells: CodeSmellDetector::new(),
        }
    }
}

impl Default for PrincipleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for PrincipleEvaluator {
    type Output = PrincipleEvaluationResult;

    fn name(&self) -> &'static str {
        "principles"
    }

    fn analyze(&self, snapshot: &RepoSnapshot) -> PrincipleEvaluationResult {
        let solid = self.solid.analyze(&snapshot.files);
        let smells = self.smells.analyze(&snapshot.files);

        let score = solid.overall_score * SOLID_WEIGHT + smells.smell_score * SMELL_WEIGHT;

        let mut violations = solid.violations;
        violations.extend(smells.violations);
        let high = violations
            .iter()
            .filter(|v| v.severity == Severity::High)
            .count();

        debug!(
            "Principles: solid {:.1}, smells {:.1}, {} violations ({} high)",
            solid.overall_score,
            smells.smell_score,
            violations.len(),
            high
        );

        PrincipleEvaluationResult {
            total_violations: violations.len(),
            high_severity_count: high,
            violations,
            principle_score: score,
            solid_scores: solid.solid_scores,
            code_smells: smells.smells,
        }
    }
}
