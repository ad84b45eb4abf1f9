//! Documentation presence analysis

use crate::models::FileEntry;
use crate::quality::is_test_file;
use serde::Serialize;

const README_FILES: &[&str] = &["readme.md", "readme.txt", "readme.rst", "readme"];
const DOC_DIRS: &[&str] = &["docs", "doc", "documentation", "wiki"];
const DOC_EXTENSIONS: &[&str] = &["md", "rst", "txt", "adoc"];

/// Project documents worth 5 points each, matched as filename substrings
const IMPORTANT_DOCS: &[&str] = &[
    "contributing",
    "license",
    "changelog",
    "code_of_conduct",
    "security",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentationMetrics {
    pub has_readme: bool,
    pub has_docs_folder: bool,
    pub doc_files_count: usize,
    /// Documentation files over non-test files (0-1)
    pub doc_ratio: f64,
    pub has_contributing: bool,
    pub has_license: bool,
    pub has_changelog: bool,
    /// Important documents found, in discovery order
    pub important_docs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentationReport {
    pub metrics: DocumentationMetrics,
    pub score: f64,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

pub struct DocumentationAnalyzer;

impl DocumentationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, files: &[FileEntry]) -> DocumentationReport {
        let regular: Vec<&FileEntry> = files.iter().filter(|f| f.is_file()).collect();
        if regular.is_empty() {
            return DocumentationReport {
                issues: vec!["No files".to_string()],
                ..Default::default()
            };
        }

        let has_readme = regular
            .iter()
            .any(|f| README_FILES.contains(&f.name.to_lowercase().as_str()));
        let has_docs = files.iter().any(|f| {
            f.directory_segments()
                .iter()
                .any(|segment| DOC_DIRS.contains(&segment.as_str()))
        });
        let doc_count = regular
            .iter()
            .filter(|f| {
                f.normalized_extension()
                    .is_some_and(|ext| DOC_EXTENSIONS.contains(&ext.as_str()))
            })
            .count();
        let important = important_docs(&regular);

        let non_test = regular.iter().filter(|f| !is_test_file(f)).count();
        let ratio = if non_test > 0 {
            doc_count as f64 / non_test as f64
        } else {
            0.0
        };

        let has = |doc: &str| important.iter().any(|d| d == doc);
        let metrics = DocumentationMetrics {
            has_readme,
            has_docs_folder: has_docs,
            doc_files_count: doc_count,
            doc_ratio: ratio,
            has_contributing: has("contributing"),
            has_license: has("license"),
            has_changelog: has("changelog"),
            important_docs: important.clone(),
        };

        DocumentationReport {
            score: doc_score(has_readme, has_docs, ratio, important.len()),
            issues: issues(has_readme, has_docs, doc_count),
            strengths: strengths(&metrics),
            metrics,
        }
    }
}

impl Default for DocumentationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn important_docs(files: &[&FileEntry]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for file in files {
        let name = file.name.to_lowercase();
        for doc in IMPORTANT_DOCS {
            if name.contains(doc) && !found.iter().any(|f| f == doc) {
                found.push(doc.to_string());
            }
        }
    }
    found
}

fn doc_score(has_readme: bool, has_docs: bool, ratio: f64, important: usize) -> f64 {
    let mut score = 0.0;
    if has_readme {
        score += 40.0;
    }
    if has_docs {
        score += 20.0;
    }
    score += (ratio * 200.0).min(20.0);
    score += (important as f64 * 5.0).min(20.0);
    score.min(100.0)
}

fn issues(has_readme: bool, has_docs: bool, count: usize) -> Vec<String> {
    let mut issues = Vec::new();
    if !has_readme {
        issues.push("Missing README".to_string());
    }
    if !has_docs && count < 3 {
        issues.push("No docs folder and few doc files".to_string());
    }
    if count == 0 {
        issues.push("No documentation files".to_string());
    }
    issues
}

fn strengths(metrics: &DocumentationMetrics) -> Vec<String> {
    let mut strengths = Vec::new();
    if metrics.has_readme {
        strengths.push("README present".to_string());
    }
    if metrics.has_docs_folder {
        strengths.push("Dedicated docs folder".to_string());
    }
    if metrics.has_contributing {
        strengths.push("Contributing guide".to_string());
    }
    if metrics.doc_files_count >= 5 {
        strengths.push(format!("{} doc files", metrics.doc_files_count));
    }
    strengths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_documented_repo() {
        let files = vec![
            FileEntry::file("README.md", Some(100)),
            FileEntry::file("CONTRIBUTING.md", Some(100)),
            FileEntry::file("LICENSE", Some(100)),
            FileEntry::file("CHANGELOG.md", Some(100)),
            FileEntry::dir("docs"),
            FileEntry::file("docs/guide.md", Some(100)),
            FileEntry::file("src/main.py", Some(100)),
        ];
        let report = DocumentationAnalyzer::new().analyze(&files);

        assert!(report.metrics.has_readme);
        assert!(report.metrics.has_docs_folder);
        assert_eq!(report.metrics.doc_files_count, 4);
        assert!(report.metrics.has_contributing);
        assert!(report.metrics.has_license);
        assert!(report.metrics.has_changelog);
        // 40 + 20 + min(4/6*200, 20) + 3*5
        assert_eq!(report.score, 95.0);
        assert!(report.issues.is_empty());
        assert_eq!(
            report.strengths,
            vec!["README present", "Dedicated docs folder", "Contributing guide"]
        );
    }

    #[test]
    fn test_important_docs_counted_once_and_capped() {
        let files = vec![
            FileEntry::file("LICENSE", None),
            FileEntry::file("LICENSE-MIT", None),
            FileEntry::file("CONTRIBUTING", None),
            FileEntry::file("CHANGELOG", None),
            FileEntry::file("CODE_OF_CONDUCT", None),
            FileEntry::file("SECURITY", None),
        ];
        let report = DocumentationAnalyzer::new().analyze(&files);
        assert_eq!(report.metrics.important_docs.len(), 5);
        // no README, no docs dir, no doc extensions; 5 docs capped at 20
        assert_eq!(report.score, 20.0);
        assert_eq!(
            report.issues,
            vec![
                "Missing README",
                "No docs folder and few doc files",
                "No documentation files"
            ]
        );
    }

    #[test]
    fn test_test_files_excluded_from_ratio_denominator() {
        let files = vec![
            FileEntry::file("notes.txt", Some(100)),
            FileEntry::file("app.py", Some(100)),
            FileEntry::file("tests/test_app.py", Some(100)),
            FileEntry::file("tests/test_more.py", Some(100)),
        ];
        let report = DocumentationAnalyzer::new().analyze(&files);
        assert!((report.metrics.doc_ratio - 0.5).abs() < 1e-9);
        assert_eq!(report.score, 20.0);
    }

    #[test]
    fn test_no_files() {
        let report = DocumentationAnalyzer::new().analyze(&[FileEntry::dir("docs")]);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.issues, vec!["No files"]);
    }
}
