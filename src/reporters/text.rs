//! Text (terminal) reporter with colors and formatting

use crate::models::Severity;
use crate::pipeline::AnalysisReport;
use anyhow::Result;

/// Maximum violations listed before truncating
const MAX_VIOLATIONS: usize = 10;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: &str) -> &'static str {
    match grade.chars().next() {
        Some('A') => "\x1b[32m", // Green
        Some('B') => "\x1b[92m", // Light green
        Some('C') => "\x1b[33m", // Yellow
        Some('D') => "\x1b[91m", // Light red
        Some('F') => "\x1b[31m", // Red
        _ => "\x1b[0m",
    }
}

/// Severity colors
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "\x1b[91m",
        Severity::Medium => "\x1b[33m",
        Severity::Low => "\x1b[34m",
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();
    let repo = &report.repository;

    // Header
    let grade = report.overall_grade();
    let grade_c = grade_color(grade);
    out.push_str(&format!("\n{BOLD}repoinsight Analysis{RESET}  {}\n", repo.full_name));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{:.1}/100{RESET}  Grade: {grade_c}{BOLD}{}{RESET}  ",
        report.overall_score, grade
    ));
    out.push_str(&format!(
        "Files: {}  Dirs: {}  Commits: {}  Contributors: {}\n\n",
        repo.total_files, repo.total_directories, repo.total_commits, repo.total_contributors
    ));

    // Scores
    let quality = &report.quality;
    let principles = &report.principles;
    let collaboration = &report.collaboration;
    out.push_str(&format!("{BOLD}SCORES{RESET}\n"));
    out.push_str(&format!(
        "  Quality        {}  {DIM}{} ({}){RESET}\n",
        format_score(quality.overall_quality_score),
        quality.grade(),
        quality.quality_level()
    ));
    out.push_str(&format!(
        "  Principles     {}  {DIM}{} ({}){RESET}\n",
        format_score(principles.principle_score),
        principles.grade(),
        principles.quality_level()
    ));
    out.push_str(&format!(
        "  Collaboration  {}  {DIM}{} ({}){RESET}\n",
        format_score(collaboration.collaboration_score),
        collaboration.grade(),
        collaboration.collaboration_level()
    ));
    out.push_str(&format!(
        "  Architecture   {}\n\n",
        format_score(report.architecture_score)
    ));

    // Architecture
    out.push_str(&format!("{BOLD}ARCHITECTURE{RESET}\n"));
    match report.architecture.primary_signal() {
        Some(signal) => {
            out.push_str(&format!(
                "  Primary: {BOLD}{}{RESET} ({:.0}%, {})\n",
                signal.pattern,
                signal.confidence,
                signal.confidence_level()
            ));
            for evidence in &signal.evidence {
                out.push_str(&format!("    {DIM}-{RESET} {}\n", evidence));
            }
        }
        None => out.push_str(&format!("  {DIM}No clear architecture pattern{RESET}\n")),
    }
    let others: Vec<String> = report
        .architecture
        .detected_patterns()
        .into_iter()
        .filter(|s| Some(s.pattern) != report.architecture.primary_pattern)
        .map(|s| format!("{} ({:.0}%)", s.pattern, s.confidence))
        .collect();
    if !others.is_empty() {
        out.push_str(&format!("  Also detected: {}\n", others.join(", ")));
    }
    out.push('\n');

    // Quality notes
    if !quality.strengths.is_empty() || !quality.issues.is_empty() {
        out.push_str(&format!("{BOLD}QUALITY{RESET}\n"));
        for strength in &quality.strengths {
            out.push_str(&format!("  \x1b[32m+{RESET} {}\n", strength));
        }
        for issue in &quality.issues {
            out.push_str(&format!("  \x1b[31m-{RESET} {}\n", issue));
        }
        out.push('\n');
    }

    // Violations
    if !principles.violations.is_empty() {
        out.push_str(&format!(
            "{BOLD}VIOLATIONS{RESET} {DIM}({} total, {} high){RESET}\n",
            principles.total_violations, principles.high_severity_count
        ));
        for (i, violation) in principles.violations.iter().take(MAX_VIOLATIONS).enumerate() {
            let sev_c = severity_color(violation.severity);
            out.push_str(&format!(
                "  {DIM}{:>3}{RESET}  {sev_c}{}{RESET}  {:<32}  {DIM}{}{RESET}\n",
                i + 1,
                severity_tag(violation.severity),
                violation.principle,
                violation.file_path.as_deref().unwrap_or("")
            ));
            out.push_str(&format!("       {}\n", violation.description));
        }
        let remaining = principles.violations.len().saturating_sub(MAX_VIOLATIONS);
        if remaining > 0 {
            out.push_str(&format!(
                "\n  {DIM}...and {} more (use --format json for the full list){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    // Collaboration
    out.push_str(&format!("{BOLD}COLLABORATION{RESET}\n"));
    out.push_str(&format!(
        "  Bus factor: {BOLD}{}{RESET} ({} risk)  Active: {}  Commits/week: {:.1}\n",
        collaboration.bus_factor,
        collaboration.bus_factor_severity(),
        collaboration.active_contributors,
        collaboration.commit_frequency
    ));
    for contributor in &collaboration.top_contributors {
        let marker = if contributor.is_key_contributor { "*" } else { " " };
        out.push_str(&format!(
            "  {marker} {:<24} {:>5} commits  {DIM}{:.1}%{RESET}\n",
            contributor.name, contributor.commits, contributor.percentage
        ));
    }
    if collaboration.has_bus_factor_risk {
        out.push_str(&format!(
            "  {}Knowledge is concentrated in few contributors{RESET}\n",
            severity_color(Severity::High)
        ));
    }
    out.push('\n');

    // Tips based on grade
    match grade {
        "A" => out.push_str(&format!("{DIM}Excellent! Keep up the good work.{RESET}\n")),
        "B" => out.push_str(&format!(
            "{DIM}Good shape. Address remaining issues for an A.{RESET}\n"
        )),
        _ => out.push_str(&format!(
            "{DIM}Run with --format markdown for a shareable report.{RESET}\n"
        )),
    }

    Ok(out)
}

/// Format score with color
fn format_score(score: f64) -> String {
    let color = if score >= 80.0 {
        "\x1b[32m"
    } else if score >= 60.0 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{:>5.1}{RESET}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoSnapshot;
    use crate::pipeline::AnalysisPipeline;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_render_header_and_sections() {
        let out = render(&test_report()).unwrap();
        assert!(out.contains("repoinsight Analysis"));
        assert!(out.contains("acme/shop"));
        assert!(out.contains("SCORES"));
        assert!(out.contains("ARCHITECTURE"));
        assert!(out.contains("COLLABORATION"));
    }

    #[test]
    fn test_render_primary_pattern_and_violations() {
        let out = render(&test_report()).unwrap();
        assert!(out.contains("Primary: \x1b[1mMVC"));
        assert!(out.contains("VIOLATIONS"));
        assert!(out.contains("Single Responsibility Principle"));
        assert!(out.contains("controllers/user_manager.py"));
    }

    #[test]
    fn test_render_empty_repository() {
        let report = AnalysisPipeline::new()
            .run(&RepoSnapshot::new("acme", "empty"))
            .unwrap();
        let out = render(&report).unwrap();
        assert!(out.contains("No clear architecture pattern"));
        assert!(out.contains("No files"));
        assert!(out.contains("Knowledge is concentrated"));
    }

    #[test]
    fn test_grade_color_uses_letter() {
        assert_eq!(grade_color("A+"), grade_color("A"));
        assert_eq!(grade_color("F"), "\x1b[31m");
    }
}
