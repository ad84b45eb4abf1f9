//! Code quality scoring
//!
//! Three independent sub-analyzers each turn the file list into a 0-100
//! sub-score plus issue and strength notes:
//!
//! - [`ComplexityAnalyzer`] - estimated file lengths
//! - [`TestCoverageAnalyzer`] - test file presence and runner configuration
//! - [`DocumentationAnalyzer`] - README, docs folder and project documents
//!
//! [`QualityAnalyzer`] combines them:
//!
//! ```text
//! overall = complexity * 0.40 + tests * 0.35 + documentation * 0.25
//! ```

mod complexity;
mod documentation;
mod test_coverage;

pub use complexity::{ComplexityAnalyzer, ComplexityReport, FileMetrics};
pub use documentation::{DocumentationAnalyzer, DocumentationMetrics, DocumentationReport};
pub use test_coverage::{is_test_file, TestCoverageAnalyzer, TestCoverageReport, TestMetrics};

use crate::analyzer::Analyzer;
use crate::models::{round1, round2, RepoSnapshot};
use serde::Serialize;
use tracing::debug;

pub const COMPLEXITY_WEIGHT: f64 = 0.40;
pub const TEST_WEIGHT: f64 = 0.35;
pub const DOCUMENTATION_WEIGHT: f64 = 0.25;

/// Aggregated quality result for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub file_metrics: FileMetrics,
    pub test_metrics: TestMetrics,
    pub documentation_metrics: DocumentationMetrics,

    pub complexity_score: f64,
    pub test_score: f64,
    pub documentation_score: f64,
    /// Weighted blend, rounded to one decimal
    pub overall_quality_score: f64,

    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

impl QualityMetrics {
    /// Result for a snapshot with no files
    pub fn empty() -> Self {
        Self {
            issues: vec!["No files".to_string()],
            ..Default::default()
        }
    }

    /// Letter grade, A+ to F
    pub fn grade(&self) -> &'static str {
        let score = self.overall_quality_score;
        match score {
            s if s >= 95.0 => "A+",
            s if s >= 90.0 => "A",
            s if s >= 85.0 => "A-",
            s if s >= 80.0 => "B+",
            s if s >= 75.0 => "B",
            s if s >= 70.0 => "B-",
            s if s >= 65.0 => "C+",
            s if s >= 60.0 => "C",
            s if s >= 55.0 => "C-",
            s if s >= 50.0 => "D",
            _ => "F",
        }
    }

    pub fn quality_level(&self) -> &'static str {
        let score = self.overall_quality_score;
        if score >= 90.0 {
            "Excellent"
        } else if score >= 80.0 {
            "Very Good"
        } else if score >= 70.0 {
            "Good"
        } else if score >= 60.0 {
            "Fair"
        } else if score >= 50.0 {
            "Poor"
        } else {
            "Critical"
        }
    }

    /// B- or better
    pub fn has_good_quality(&self) -> bool {
        self.overall_quality_score >= 70.0
    }

    pub fn to_dict(&self) -> serde_json::Value {
        let files = &self.file_metrics;
        let tests = &self.test_metrics;
        let docs = &self.documentation_metrics;

        serde_json::json!({
            "file_metrics": {
                "total_files": files.total_files,
                "total_lines": files.total_lines,
                "avg_file_length": round1(files.avg_file_length),
                "median_file_length": round1(files.median_file_length),
                "large_files_count": files.large_files_count,
                "very_large_files_count": files.very_large_files_count,
                "max_file_length": files.max_file_length,
            },
            "test_metrics": {
                "has_tests": tests.has_tests,
                "test_files_count": tests.test_files_count,
                "test_ratio": round2(tests.test_ratio),
                "has_test_directories": tests.has_test_directories,
                "has_test_config": tests.has_test_config,
            },
            "documentation_metrics": {
                "has_readme": docs.has_readme,
                "has_docs_folder": docs.has_docs_folder,
                "documented_files_count": docs.doc_files_count,
                "doc_ratio": round2(docs.doc_ratio),
                "has_contributing": docs.has_contributing,
                "has_license": docs.has_license,
                "has_changelog": docs.has_changelog,
            },
            "scores": {
                "complexity": round1(self.complexity_score),
                "tests": round1(self.test_score),
                "documentation": round1(self.documentation_score),
                "overall": round1(self.overall_quality_score),
            },
            "grade": self.grade(),
            "quality_level": self.quality_level(),
            "issues": self.issues,
            "strengths": self.strengths,
        })
    }
}

/// Runs the three quality sub-analyzers and blends their scores
pub struct QualityAnalyzer {
    complexity: ComplexityAnalyzer,
    tests: TestCoverageAnalyzer,
    documentation: DocumentationAnalyzer,
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self {
            complexity: ComplexityAnalyzer::new(),
            tests: TestCoverageAnalyzer::new(),
            documentation: DocumentationAnalyzer::new(),
        }
    }
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for QualityAnalyzer {
    type Output = QualityMetrics;

    fn name(&self) -> &'static str {
        "quality"
    }

    fn analyze(&self, snapshot: &RepoSnapshot) -> QualityMetrics {
        if snapshot.total_files() == 0 {
            debug!("Quality: no files, returning empty metrics");
            return QualityMetrics::empty();
        }

        let files = &snapshot.files;
        let complexity = self.complexity.analyze(files);
        let tests = self.tests.analyze(files);
        let documentation = self.documentation.analyze(files);

        let overall = round1(
            complexity.score * COMPLEXITY_WEIGHT
                + tests.score * TEST_WEIGHT
                + documentation.score * DOCUMENTATION_WEIGHT,
        );
        debug!(
            "Quality: complexity {:.1}, tests {:.1}, docs {:.1}, overall {:.1}",
            complexity.score, tests.score, documentation.score, overall
        );

        let mut issues = complexity.issues;
        issues.extend(tests.issues);
        issues.extend(documentation.issues);

        let mut strengths = complexity.strengths;
        strengths.extend(tests.strengths);
        strengths.extend(documentation.strengths);

        QualityMetrics {
            file_metrics: complexity.metrics,
            test_metrics: tests.metrics,
            documentation_metrics: documentation.metrics,
            complexity_score: complexity.score,
            test_score: tests.score,
            documentation_score: documentation.score,
            overall_quality_score: overall,
            issues,
            strengths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileEntry;

    fn metrics_with_score(score: f64) -> QualityMetrics {
        QualityMetrics {
            overall_quality_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = COMPLEXITY_WEIGHT + TEST_WEIGHT + DOCUMENTATION_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_files() {
        let mut snapshot = RepoSnapshot::new("acme", "empty");
        snapshot.files.push(FileEntry::dir("src"));
        let metrics = QualityAnalyzer::new().analyze(&snapshot);

        assert_eq!(metrics.complexity_score, 0.0);
        assert_eq!(metrics.test_score, 0.0);
        assert_eq!(metrics.documentation_score, 0.0);
        assert_eq!(metrics.overall_quality_score, 0.0);
        assert_eq!(metrics.issues, vec!["No files"]);
        assert!(metrics.strengths.is_empty());
        assert_eq!(metrics.grade(), "F");
        assert_eq!(metrics.quality_level(), "Critical");
    }

    #[test]
    fn test_blended_score() {
        let mut snapshot = RepoSnapshot::new("acme", "shop");
        snapshot.files = vec![
            FileEntry::file("README.md", Some(900)),
            FileEntry::dir("tests"),
            FileEntry::file("tests/test_app.py", Some(900)),
            FileEntry::file("app.py", Some(900)),
        ];
        let metrics = QualityAnalyzer::new().analyze(&snapshot);

        // complexity 100, tests min(1/3*267, 80) + 10 = 90,
        // docs 40 + min(1/2*200, 20) = 60
        assert_eq!(metrics.complexity_score, 100.0);
        assert_eq!(metrics.test_score, 90.0);
        assert_eq!(metrics.documentation_score, 60.0);
        // 40 + 31.5 + 15
        assert_eq!(metrics.overall_quality_score, 86.5);
        assert_eq!(metrics.grade(), "A-");
        assert_eq!(metrics.quality_level(), "Very Good");
        assert!(metrics.has_good_quality());
        assert!(metrics.strengths.contains(&"README present".to_string()));
        assert!(metrics
            .issues
            .contains(&"No docs folder and few doc files".to_string()));
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(metrics_with_score(95.0).grade(), "A+");
        assert_eq!(metrics_with_score(94.9).grade(), "A");
        assert_eq!(metrics_with_score(70.0).grade(), "B-");
        assert_eq!(metrics_with_score(50.0).grade(), "D");
        assert_eq!(metrics_with_score(49.9).grade(), "F");
        assert_eq!(metrics_with_score(60.0).quality_level(), "Fair");
        assert!(!metrics_with_score(69.9).has_good_quality());
    }

    #[test]
    fn test_to_dict_sections() {
        let mut snapshot = RepoSnapshot::new("acme", "shop");
        snapshot.files = vec![FileEntry::file("main.py", Some(450))];
        let dict = QualityAnalyzer::new().analyze(&snapshot).to_dict();

        for key in [
            "file_metrics",
            "test_metrics",
            "documentation_metrics",
            "scores",
            "grade",
            "quality_level",
            "issues",
            "strengths",
        ] {
            assert!(dict.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(dict["file_metrics"]["total_lines"], 10);
        assert_eq!(dict["scores"]["complexity"], 100.0);
    }
}
