//! Core data models for repoinsight
//!
//! The [`RepoSnapshot`] is the normalized, already-ingested view of a
//! repository that every analyzer consumes. It carries structural metadata
//! only: the file tree, a bounded recent commit log and the contributor
//! roster. No file content is ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Bytes-per-line ratio used to estimate line counts from file sizes
pub const BYTES_PER_LINE: u64 = 45;

/// Estimate a file's line count from its size in bytes.
///
/// Integer division by [`BYTES_PER_LINE`]. Unknown and zero sizes yield
/// `None`; callers decide the fallback (the complexity analyzer assumes
/// 100 lines, the principle checks skip the file).
pub fn estimate_lines(size: Option<u64>) -> Option<u64> {
    match size {
        Some(bytes) if bytes > 0 => Some(bytes / BYTES_PER_LINE),
        _ => None,
    }
}

/// Errors raised for snapshots that cannot be analyzed at all
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("file entry #{index} has an empty path")]
    EmptyPath { index: usize },

    #[error("file entry `{path}` must be relative to the repository root")]
    AbsolutePath { path: String },

    #[error("file entry `{path}` has an empty name")]
    EmptyName { path: String },

    #[error("directory entry `{path}` must not carry a size")]
    DirectoryWithSize { path: String },

    #[error("commit #{index} is missing its `{field}`")]
    InvalidCommit { index: usize, field: &'static str },
}

/// Kind of a file tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    #[serde(rename = "dir", alias = "directory")]
    Directory,
}

/// A single file or directory in the repository tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Slash-separated path relative to the repository root
    pub path: String,
    /// Final path segment
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: FileKind,
    /// Size in bytes (files only)
    #[serde(default)]
    pub size: Option<u64>,
    /// Extension as reported by ingestion, e.g. ".py"
    #[serde(default)]
    pub extension: Option<String>,
}

impl FileEntry {
    /// Build a file entry, deriving name and extension from the path
    pub fn file(path: impl Into<String>, size: Option<u64>) -> Self {
        let path = path.into();
        let name = last_segment(&path).to_string();
        let extension = name
            .rfind('.')
            .filter(|&idx| idx > 0)
            .map(|idx| name[idx..].to_string());
        Self {
            path,
            name,
            kind: FileKind::File,
            size,
            extension,
        }
    }

    /// Build a directory entry
    pub fn dir(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = last_segment(&path).to_string();
        Self {
            path,
            name,
            kind: FileKind::Directory,
            size: None,
            extension: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Lowercased extension without the leading dot.
    ///
    /// Falls back to the name when ingestion did not report one.
    pub fn normalized_extension(&self) -> Option<String> {
        let raw = match &self.extension {
            Some(ext) if !ext.is_empty() => ext.as_str(),
            _ => {
                let idx = self.name.rfind('.').filter(|&idx| idx > 0)?;
                &self.name[idx..]
            }
        };
        let trimmed = raw.trim_start_matches('.');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Lowercased directory segments this entry lives under.
    ///
    /// For a directory the entry's own name is included.
    pub fn directory_segments(&self) -> Vec<String> {
        let lower = self.path.to_lowercase();
        let mut parts: Vec<&str> = lower.split('/').filter(|p| !p.is_empty()).collect();
        if self.is_file() {
            parts.pop();
        }
        parts.into_iter().map(str::to_string).collect()
    }

    /// Estimated line count, see [`estimate_lines`]
    pub fn estimated_lines(&self) -> Option<u64> {
        estimate_lines(self.size)
    }
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// A commit from the bounded, recency-ordered history window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    #[serde(alias = "sha")]
    pub id: String,
    /// First line of the commit message
    #[serde(default)]
    pub message: String,
    /// Blank when the provider has no author; credited to `Unknown`
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub files_changed: Option<u32>,
}

/// A contributor from the hosting provider's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorEntry {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub commit_count: u64,
    #[serde(default)]
    pub lines_added: Option<u64>,
    #[serde(default)]
    pub lines_deleted: Option<u64>,
}

impl ContributorEntry {
    /// Display name, falling back to the username
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

/// Normalized repository snapshot produced by ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub primary_language: Option<String>,
    /// Language name to byte count
    #[serde(default)]
    pub languages: BTreeMap<String, u64>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub commits: Vec<CommitEntry>,
    #[serde(default)]
    pub contributors: Vec<ContributorEntry>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepoSnapshot {
    /// Create an empty snapshot for `owner/name`
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        Self {
            url: format!("https://github.com/{}/{}", owner, name),
            owner,
            name,
            description: None,
            primary_language: None,
            languages: BTreeMap::new(),
            files: Vec::new(),
            commits: Vec::new(),
            contributors: Vec::new(),
            stars: 0,
            forks: 0,
            open_issues: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Parse and validate a snapshot JSON document
    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        let snapshot: RepoSnapshot = serde_json::from_str(input)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the structural requirements every analyzer relies on
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.owner.trim().is_empty() {
            return Err(SnapshotError::MissingField("owner"));
        }
        if self.name.trim().is_empty() {
            return Err(SnapshotError::MissingField("name"));
        }

        for (index, entry) in self.files.iter().enumerate() {
            if entry.path.trim().is_empty() {
                return Err(SnapshotError::EmptyPath { index });
            }
            if entry.path.starts_with('/') {
                return Err(SnapshotError::AbsolutePath {
                    path: entry.path.clone(),
                });
            }
            if entry.name.trim().is_empty() {
                return Err(SnapshotError::EmptyName {
                    path: entry.path.clone(),
                });
            }
            if entry.is_directory() && entry.size.is_some() {
                return Err(SnapshotError::DirectoryWithSize {
                    path: entry.path.clone(),
                });
            }
        }

        for (index, commit) in self.commits.iter().enumerate() {
            if commit.id.trim().is_empty() {
                return Err(SnapshotError::InvalidCommit { index, field: "id" });
            }
        }

        Ok(())
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Iterator over file (non-directory) entries
    pub fn file_entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(|f| f.is_file())
    }

    pub fn total_files(&self) -> usize {
        self.file_entries().count()
    }

    pub fn total_directories(&self) -> usize {
        self.files.iter().filter(|f| f.is_directory()).count()
    }

    /// Files whose extension matches (with or without the leading dot)
    pub fn files_by_extension(&self, extension: &str) -> Vec<&FileEntry> {
        let wanted = extension.trim_start_matches('.').to_lowercase();
        self.file_entries()
            .filter(|f| f.normalized_extension().as_deref() == Some(wanted.as_str()))
            .collect()
    }

    /// Files recognised as tests, see [`crate::quality::is_test_file`]
    pub fn test_files(&self) -> Vec<&FileEntry> {
        self.file_entries()
            .filter(|f| crate::quality::is_test_file(f))
            .collect()
    }

    /// Language share in percent (0-100); empty when no bytes are recorded
    pub fn language_distribution(&self) -> BTreeMap<String, f64> {
        let total: u64 = self.languages.values().sum();
        if total == 0 {
            return BTreeMap::new();
        }
        self.languages
            .iter()
            .map(|(lang, bytes)| (lang.clone(), *bytes as f64 / total as f64 * 100.0))
            .collect()
    }

    /// Top `n` roster entries by their own `commit_count`
    pub fn top_contributors(&self, n: usize) -> Vec<&ContributorEntry> {
        let mut sorted: Vec<&ContributorEntry> = self.contributors.iter().collect();
        sorted.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
        sorted.truncate(n);
        sorted
    }

    /// Whole days between creation and `as_of`, if creation time is known
    pub fn age_days(&self, as_of: DateTime<Utc>) -> Option<i64> {
        self.created_at.map(|created| (as_of - created).num_days())
    }

    /// Distinct lowercased directory names found anywhere in the tree.
    ///
    /// Directory entries contribute every segment of their path; file
    /// entries contribute the segments of their parent path.
    pub fn directory_names(&self) -> std::collections::BTreeSet<String> {
        self.files
            .iter()
            .flat_map(|f| f.directory_segments())
            .collect()
    }
}

/// Severity of a principle violation or code smell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// A single principle violation or code smell occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub principle: String,
    pub severity: Severity,
    #[serde(rename = "file")]
    pub file_path: Option<String>,
    pub description: String,
    pub suggestion: String,
}

impl Violation {
    pub fn new(
        principle: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            principle: principle.into(),
            severity,
            file_path: None,
            description: description.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
