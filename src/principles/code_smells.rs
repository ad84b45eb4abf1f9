//! Code smell heuristics from file names and sizes

use crate::models::{FileEntry, Severity, Violation};
use indexmap::IndexMap;

/// Estimated lines above which a file is treated as a god class
const GOD_CLASS_SIZE: u64 = 1500;

const DEAD_CODE_INDICATORS: &[&str] = &["old_", "backup_", "temp_", "deprecated_"];

const CONFIG_PATTERNS: &[&str] = &["config", "settings", ".env", "configuration"];

#[derive(Debug, Clone, PartialEq)]
pub struct SmellReport {
    pub violations: Vec<Violation>,
    /// Distinct smell names found, in detection order
    pub smells: Vec<String>,
    pub smell_score: f64,
}

pub struct CodeSmellDetector;

impl CodeSmellDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, files: &[FileEntry]) -> SmellReport {
        let checks: [(&str, Vec<Violation>); 4] = [
            ("God Classes", god_classes(files)),
            ("Dead Code", dead_code(files)),
            ("Duplicate Code", duplicate_names(files)),
            ("Magic Numbers", missing_config(files)),
        ];

        let mut violations = Vec::new();
        let mut smells = Vec::new();
        for (smell, found) in checks {
            if !found.is_empty() {
                smells.push(smell.to_string());
                violations.extend(found);
            }
        }

        SmellReport {
            smell_score: smell_score(violations.len()),
            violations,
            smells,
        }
    }
}

impl Default for CodeSmellDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn god_classes(files: &[FileEntry]) -> Vec<Violation> {
    files
        .iter()
        .filter(|f| f.is_file())
        .filter_map(|f| {
            let lines = f.estimated_lines()?;
            (lines > GOD_CLASS_SIZE).then(|| {
                Violation::new(
                    "God Class",
                    Severity::High,
                    format!("File has ~{} lines, likely a god class doing too much", lines),
                    "Break into smaller, cohesive modules with single responsibilities",
                )
                .at(&f.path)
            })
        })
        .collect()
}

/// One violation per file, for the first matching marker
fn dead_code(files: &[FileEntry]) -> Vec<Violation> {
    files
        .iter()
        .filter(|f| f.is_file())
        .filter_map(|f| {
            let name = f.name.to_lowercase();
            let marker = DEAD_CODE_INDICATORS.iter().find(|m| name.contains(*m))?;
            Some(
                Violation::new(
                    "Dead Code",
                    Severity::Low,
                    format!("File name suggests dead/unused code: '{}'", marker),
                    "Remove if truly unused or rename appropriately",
                )
                .at(&f.path),
            )
        })
        .collect()
}

/// Files whose names differ only by digits, e.g. `utils.py` and `utils2.py`
fn duplicate_names(files: &[FileEntry]) -> Vec<Violation> {
    let mut groups: IndexMap<String, Vec<&str>> = IndexMap::new();
    for file in files.iter().filter(|f| f.is_file()) {
        let base: String = file.name.chars().filter(|c| !c.is_ascii_digit()).collect();
        groups.entry(base).or_default().push(&file.name);
    }

    groups
        .values()
        .filter(|names| names.len() > 1)
        .map(|names| {
            Violation::new(
                "Duplicate Code",
                Severity::Medium,
                format!("Similar file names suggest duplication: {}", names.join(", ")),
                "Consolidate or refactor common code into shared module",
            )
        })
        .collect()
}

fn missing_config(files: &[FileEntry]) -> Vec<Violation> {
    let has_config = files.iter().any(|f| {
        let name = f.name.to_lowercase();
        CONFIG_PATTERNS.iter().any(|p| name.contains(p))
    });

    if has_config {
        Vec::new()
    } else {
        vec![Violation::new(
            "Magic Numbers",
            Severity::Medium,
            "No configuration files found - values likely hardcoded",
            "Create config files to centralize configuration values",
        )]
    }
}

fn smell_score(violations: usize) -> f64 {
    match violations {
        0 => 100.0,
        1..=2 => 90.0,
        3..=5 => 75.0,
        6..=10 => 60.0,
        _ => 40.0,
    }
}
