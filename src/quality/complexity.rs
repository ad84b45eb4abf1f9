//! File-size complexity analysis
//!
//! Line counts are estimated from byte sizes (see
//! [`crate::models::estimate_lines`]); files with an unknown size count as
//! 100 lines.

use crate::models::FileEntry;
use serde::Serialize;

/// Estimated lines assumed for files without a known size
pub const DEFAULT_FILE_LINES: u64 = 100;
/// Average above which files are considered too long
pub const REASONABLE_SIZE: u64 = 300;
pub const LARGE_SIZE: u64 = 500;
pub const VERY_LARGE_SIZE: u64 = 1000;

/// Raw file-size statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileMetrics {
    pub total_files: usize,
    pub total_lines: u64,
    pub avg_file_length: f64,
    pub median_file_length: f64,
    pub max_file_length: u64,
    /// Files over 500 estimated lines
    pub large_files_count: usize,
    /// Files over 1000 estimated lines
    pub very_large_files_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub metrics: FileMetrics,
    pub score: f64,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, files: &[FileEntry]) -> ComplexityReport {
        let lengths: Vec<u64> = files
            .iter()
            .filter(|f| f.is_file())
            .map(|f| f.estimated_lines().unwrap_or(DEFAULT_FILE_LINES))
            .collect();

        if lengths.is_empty() {
            return ComplexityReport {
                issues: vec!["No files".to_string()],
                ..Default::default()
            };
        }

        let total_files = lengths.len();
        let total_lines: u64 = lengths.iter().sum();
        let large = lengths.iter().filter(|&&l| l > LARGE_SIZE).count();
        let very_large = lengths.iter().filter(|&&l| l > VERY_LARGE_SIZE).count();
        let avg = total_lines as f64 / total_files as f64;

        let metrics = FileMetrics {
            total_files,
            total_lines,
            avg_file_length: avg,
            median_file_length: median(&lengths),
            max_file_length: lengths.iter().copied().max().unwrap_or(0),
            large_files_count: large,
            very_large_files_count: very_large,
        };

        ComplexityReport {
            score: complexity_score(total_files, large, very_large, avg),
            issues: issues(large, very_large, avg),
            strengths: strengths(large, avg),
            metrics,
        }
    }
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Median; the mean of the two middle values for even counts
fn median(values: &[u64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.is_empty() {
        0.0
    } else if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

fn complexity_score(total: usize, large: usize, very_large: usize, avg: f64) -> f64 {
    let total = total as f64;
    let mut score = 100.0;
    score -= (large as f64 / total * 100.0).min(30.0);
    score -= (very_large as f64 / total * 150.0).min(30.0);
    if avg > REASONABLE_SIZE as f64 {
        score -= ((avg - REASONABLE_SIZE as f64) / 35.0).min(20.0);
    }
    score.max(0.0)
}

fn issues(large: usize, very_large: usize, avg: f64) -> Vec<String> {
    let mut issues = Vec::new();
    if very_large > 0 {
        issues.push(format!("{} files >1000 lines", very_large));
    }
    if large > 5 {
        issues.push(format!("{} files >500 lines", large));
    }
    if avg > REASONABLE_SIZE as f64 {
        issues.push(format!("Avg size {:.0} exceeds 300", avg));
    }
    issues
}

fn strengths(large: usize, avg: f64) -> Vec<String> {
    let mut strengths = Vec::new();
    if large == 0 {
        strengths.push("All files <500 lines".to_string());
    }
    if avg < REASONABLE_SIZE as f64 {
        strengths.push(format!("Avg size {:.0} within range", avg));
    }
    strengths
}
