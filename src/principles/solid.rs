//! SOLID heuristics from file layout
//!
//! Only two principles leave a structural footprint:
//! - Single Responsibility: very long files likely do several things
//! - Dependency Inversion: infrastructure without a domain layer
//!
//! Open/Closed, Liskov Substitution and Interface Segregation cannot be
//! heuristically detected from file layout alone and are scored at a
//! neutral 75.

use crate::models::{FileEntry, Severity, Violation};
use indexmap::IndexMap;
use std::collections::BTreeSet;

pub const SRP_PRINCIPLE: &str = "Single Responsibility Principle";
pub const DIP_PRINCIPLE: &str = "Dependency Inversion Principle";

/// Likely SRP violation
const VERY_LARGE_FILE: u64 = 1000;
/// Possible SRP violation
const LARGE_FILE: u64 = 500;

/// Score for principles that layout cannot reveal
pub const NEUTRAL_SCORE: f64 = 75.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SolidReport {
    pub violations: Vec<Violation>,
    /// Per-principle scores in S, O, L, I, D order
    pub solid_scores: IndexMap<String, f64>,
    pub overall_score: f64,
}

pub struct SolidAnalyzer;

impl SolidAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, files: &[FileEntry]) -> SolidReport {
        let file_count = files.iter().filter(|f| f.is_file()).count();

        let srp = check_srp(files);
        let dip = check_dip(files);

        let srp_score = srp_score(file_count, srp.len());
        let dip_score = match dip.len() {
            0 => 100.0,
            1 => 75.0,
            _ => 50.0,
        };

        let overall = srp_score * 0.4
            + dip_score * 0.3
            + NEUTRAL_SCORE * 0.1
            + NEUTRAL_SCORE * 0.1
            + NEUTRAL_SCORE * 0.1;

        let mut solid_scores = IndexMap::new();
        solid_scores.insert("single_responsibility".to_string(), srp_score);
        solid_scores.insert("open_closed".to_string(), NEUTRAL_SCORE);
        solid_scores.insert("liskov_substitution".to_string(), NEUTRAL_SCORE);
        solid_scores.insert("interface_segregation".to_string(), NEUTRAL_SCORE);
        solid_scores.insert("dependency_inversion".to_string(), dip_score);

        let mut violations = srp;
        violations.extend(dip);

        SolidReport {
            violations,
            solid_scores,
            overall_score: overall,
        }
    }
}

impl Default for SolidAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Files with unknown or zero size are skipped
fn check_srp(files: &[FileEntry]) -> Vec<Violation> {
    files
        .iter()
        .filter(|f| f.is_file())
        .filter_map(|f| f.estimated_lines().map(|lines| (f, lines)))
        .filter_map(|(f, lines)| {
            if lines > VERY_LARGE_FILE {
                Some(
                    Violation::new(
                        SRP_PRINCIPLE,
                        Severity::High,
                        format!(
                            "File has ~{} lines, likely handles multiple responsibilities",
                            lines
                        ),
                        "Split into smaller, focused modules (aim for <300 lines)",
                    )
                    .at(&f.path),
                )
            } else if lines > LARGE_FILE {
                Some(
                    Violation::new(
                        SRP_PRINCIPLE,
                        Severity::Medium,
                        format!("File has ~{} lines, may violate SRP", lines),
                        "Review if file has single, well-defined purpose",
                    )
                    .at(&f.path),
                )
            } else {
                None
            }
        })
        .collect()
}

fn check_dip(files: &[FileEntry]) -> Vec<Violation> {
    let dirs: BTreeSet<String> = files.iter().flat_map(|f| f.directory_segments()).collect();
    let has_domain = dirs.iter().any(|d| d.contains("domain"));
    let has_infra = dirs.iter().any(|d| d.contains("infrastructure"));

    if has_infra && !has_domain {
        vec![Violation::new(
            DIP_PRINCIPLE,
            Severity::Medium,
            "Has infrastructure/ but no domain/ layer - dependencies may point wrong direction",
            "Create domain/ layer independent of infrastructure details",
        )]
    } else {
        Vec::new()
    }
}

fn srp_score(file_count: usize, violations: usize) -> f64 {
    if file_count == 0 {
        return 100.0;
    }
    let ratio = violations as f64 / file_count as f64;
    (100.0 - ratio * 200.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srp_thresholds() {
        let files = vec![
            FileEntry::file("src/huge.py", Some(45 * 1001)),
            FileEntry::file("src/big.py", Some(45 * 501)),
            FileEntry::file("src/edge.py", Some(45 * 500)),
            FileEntry::file("src/unknown.py", None),
        ];
        let report = SolidAnalyzer::new().analyze(&files);

        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].severity, Severity::High);
        assert_eq!(report.violations[0].file_path.as_deref(), Some("src/huge.py"));
        assert_eq!(
            report.violations[0].description,
            "File has ~1001 lines, likely handles multiple responsibilities"
        );
        assert_eq!(report.violations[1].severity, Severity::Medium);

        // 2 of 4 files -> 100 - 0.5 * 200
        assert_eq!(report.solid_scores["single_responsibility"], 0.0);
    }

    #[test]
    fn test_clean_repo_scores() {
        let files = vec![FileEntry::file("src/a.py", Some(450))];
        let report = SolidAnalyzer::new().analyze(&files);

        assert!(report.violations.is_empty());
        assert_eq!(report.solid_scores["single_responsibility"], 100.0);
        assert_eq!(report.solid_scores["dependency_inversion"], 100.0);
        assert_eq!(report.solid_scores["open_closed"], 75.0);
        // 40 + 30 + 22.5
        assert!((report.overall_score - 92.5).abs() < 1e-9);
    }

    #[test]
    fn test_dip_violation() {
        let files = vec![
            FileEntry::dir("src/infrastructure"),
            FileEntry::file("src/infrastructure/db.py", Some(450)),
        ];
        let report = SolidAnalyzer::new().analyze(&files);

        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].principle, DIP_PRINCIPLE);
        assert_eq!(report.violations[0].file_path, None);
        assert_eq!(report.solid_scores["dependency_inversion"], 75.0);
    }

    #[test]
    fn test_domain_suppresses_dip() {
        let files = vec![
            FileEntry::dir("infrastructure"),
            FileEntry::dir("core_domain"),
        ];
        let report = SolidAnalyzer::new().analyze(&files);
        assert!(report.violations.is_empty());
        assert_eq!(report.solid_scores["single_responsibility"], 100.0);
    }

    #[test]
    fn test_score_key_order() {
        let report = SolidAnalyzer::new().analyze(&[]);
        let keys: Vec<&str> = report.solid_scores.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "single_responsibility",
                "open_closed",
                "liskov_substitution",
                "interface_segregation",
                "dependency_inversion"
            ]
        );
    }
}
