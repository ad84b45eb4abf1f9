//! Test presence analysis

use crate::models::FileEntry;
use serde::Serialize;

/// Lowercase filename fragments marking a test file
const TEST_NAME_PATTERNS: &[&str] = &["test_", "_test.", ".test.", ".spec."];

/// Directory names that hold tests
pub const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "spec", "specs"];

/// Test-runner configuration files
const TEST_CONFIGS: &[&str] = &[
    "pytest.ini",
    "jest.config.js",
    "jest.config.ts",
    "vitest.config.js",
    "vitest.config.ts",
    ".rspec",
];

/// Check if a file looks like a test.
///
/// Matches on naming conventions (`test_x.py`, `x_test.go`, `x.test.ts`,
/// `x.spec.js`) or on living under a test directory at any depth.
pub fn is_test_file(file: &FileEntry) -> bool {
    if !file.is_file() {
        return false;
    }
    let name = file.name.to_lowercase();
    if TEST_NAME_PATTERNS.iter().any(|p| name.contains(p)) {
        return true;
    }
    file.directory_segments()
        .iter()
        .any(|segment| TEST_DIRS.contains(&segment.as_str()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestMetrics {
    pub has_tests: bool,
    pub test_files_count: usize,
    /// Test files over all files (0-1)
    pub test_ratio: f64,
    pub has_test_directories: bool,
    pub has_test_config: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestCoverageReport {
    pub metrics: TestMetrics,
    pub score: f64,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

pub struct TestCoverageAnalyzer;

impl TestCoverageAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, files: &[FileEntry]) -> TestCoverageReport {
        let total = files.iter().filter(|f| f.is_file()).count();
        if total == 0 {
            return TestCoverageReport {
                issues: vec!["No files".to_string()],
                ..Default::default()
            };
        }

        let count = files.iter().filter(|f| is_test_file(f)).count();
        let has_dirs = has_test_directories(files);
        let has_config = files
            .iter()
            .filter(|f| f.is_file())
            .any(|f| TEST_CONFIGS.contains(&f.name.to_lowercase().as_str()));
        let ratio = count as f64 / total as f64;

        TestCoverageReport {
            metrics: TestMetrics {
                has_tests: count > 0,
                test_files_count: count,
                test_ratio: ratio,
                has_test_directories: has_dirs,
                has_test_config: has_config,
            },
            score: test_score(ratio, has_dirs, has_config),
            issues: issues(count, ratio),
            strengths: strengths(count, ratio, has_dirs),
        }
    }
}

impl Default for TestCoverageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn has_test_directories(files: &[FileEntry]) -> bool {
    files.iter().any(|f| {
        f.directory_segments()
            .iter()
            .any(|segment| TEST_DIRS.contains(&segment.as_str()))
    })
}

fn test_score(ratio: f64, has_dirs: bool, has_config: bool) -> f64 {
    let mut score = (ratio * 267.0).min(80.0);
    if has_dirs {
        score += 10.0;
    }
    if has_config {
        score += 10.0;
    }
    score.min(100.0)
}

/// Ratio as a percentage with one decimal, e.g. `12.5%`
fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn issues(count: usize, ratio: f64) -> Vec<String> {
    if count == 0 {
        vec!["No tests detected (critical)".to_string()]
    } else if ratio < 0.10 {
        vec![format!("Very low coverage ({})", percent(ratio))]
    } else if ratio < 0.20 {
        vec![format!("Below recommended ({})", percent(ratio))]
    } else {
        Vec::new()
    }
}

fn strengths(count: usize, ratio: f64, has_dirs: bool) -> Vec<String> {
    let mut strengths = Vec::new();
    if ratio >= 0.30 {
        strengths.push(format!("Excellent coverage ({})", percent(ratio)));
    } else if ratio >= 0.20 {
        strengths.push(format!("Good coverage ({})", percent(ratio)));
    }
    if has_dirs {
        strengths.push("Organized test structure".to_string());
    }
    if count > 0 {
        strengths.push(format!("{} test files", count));
    }
    strengths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_test_file_by_name() {
        assert!(is_test_file(&FileEntry::file("src/test_models.py", None)));
        assert!(is_test_file(&FileEntry::file("pkg/server_test.go", None)));
        assert!(is_test_file(&FileEntry::file("web/App.test.tsx", None)));
        assert!(is_test_file(&FileEntry::file("web/api.SPEC.js", None)));
        assert!(!is_test_file(&FileEntry::file("src/contest.py", None)));
        assert!(!is_test_file(&FileEntry::file("src/latest.rs", None)));
    }

    #[test]
    fn test_is_test_file_by_directory() {
        assert!(is_test_file(&FileEntry::file("tests/helpers.py", None)));
        assert!(is_test_file(&FileEntry::file("app/__tests__/util.js", None)));
        assert!(is_test_file(&FileEntry::file("Spec/models/user.rb", None)));
        assert!(!is_test_file(&FileEntry::file("testing/helpers.py", None)));
        assert!(!is_test_file(&FileEntry::dir("tests")));
    }

    #[test]
    fn test_full_marks() {
        let files = vec![
            FileEntry::dir("tests"),
            FileEntry::file("tests/test_a.py", Some(10)),
            FileEntry::file("pytest.ini", Some(10)),
        ];
        let report = TestCoverageAnalyzer::new().analyze(&files);

        assert_eq!(report.metrics.test_files_count, 1);
        assert!((report.metrics.test_ratio - 0.5).abs() < 1e-9);
        assert!(report.metrics.has_test_directories);
        assert!(report.metrics.has_test_config);
        assert_eq!(report.score, 100.0);
        assert!(report.issues.is_empty());
        assert_eq!(
            report.strengths,
            vec![
                "Excellent coverage (50.0%)",
                "Organized test structure",
                "1 test files"
            ]
        );
    }

    #[test]
    fn test_low_ratio() {
        let mut files: Vec<FileEntry> = (0..19)
            .map(|i| FileEntry::file(format!("src/m{}.py", i), Some(10)))
            .collect();
        files.push(FileEntry::file("src/test_m.py", Some(10)));
        let report = TestCoverageAnalyzer::new().analyze(&files);

        // 1/20 = 5% -> 13.35 points
        assert!((report.score - 13.35).abs() < 1e-9);
        assert!(!report.metrics.has_test_directories);
        assert_eq!(report.issues, vec!["Very low coverage (5.0%)"]);
    }

    #[test]
    fn test_below_recommended() {
        let mut files: Vec<FileEntry> = (0..6)
            .map(|i| FileEntry::file(format!("m{}.py", i), Some(10)))
            .collect();
        files.push(FileEntry::file("m_test.py", Some(10)));
        let report = TestCoverageAnalyzer::new().analyze(&files);
        assert_eq!(report.issues, vec!["Below recommended (14.3%)"]);
    }

    #[test]
    fn test_no_tests() {
        let files = vec![FileEntry::file("main.py", Some(10))];
        let report = TestCoverageAnalyzer::new().analyze(&files);
        assert_eq!(report.score, 0.0);
        assert!(!report.metrics.has_tests);
        assert_eq!(report.issues, vec!["No tests detected (critical)"]);
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_no_files() {
        let report = TestCoverageAnalyzer::new().analyze(&[]);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.issues, vec!["No files"]);
    }
}
