//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - README badges and summaries
//! - Pull request comments
//! - Repository wikis

use crate::models::Severity;
use crate::pipeline::AnalysisReport;
use anyhow::Result;
use chrono::Local;

/// Maximum violations listed per severity level
const MAX_VIOLATIONS_PER_SEVERITY: usize = 10;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut md = String::new();

    // Header
    md.push_str(&render_header(report));
    md.push('\n');

    // Table of Contents
    md.push_str(&render_toc());
    md.push('\n');

    // Summary
    md.push_str(&render_summary(report));
    md.push('\n');

    // Category Scores
    md.push_str(&render_category_scores(report));
    md.push('\n');

    md.push_str(&render_architecture(report));
    md.push('\n');

    md.push_str(&render_quality(report));
    md.push('\n');

    md.push_str(&render_violations(report));
    md.push('\n');

    md.push_str(&render_collaboration(report));
    md.push('\n');

    // Footer
    md.push_str(&render_footer(report));

    Ok(md)
}

fn render_header(report: &AnalysisReport) -> String {
    let grade = report.overall_grade();
    let grade_emoji = match grade {
        "A" => "🏆",
        "B" => "⭐",
        "C" => "⚠️",
        "D" => "❌",
        "F" => "💀",
        _ => "❓",
    };

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"# {} {} Repository Insight Report

**Grade: {}** | **Score: {:.1}/100**

Generated: {}
"#,
        grade_emoji, report.repository.full_name, grade, report.overall_score, timestamp
    )
}

fn render_toc() -> String {
    r#"## Table of Contents

- [Summary](#summary)
- [Category Scores](#category-scores)
- [Architecture](#architecture)
- [Code Quality](#code-quality)
- [Principle Violations](#principle-violations)
- [Collaboration](#collaboration)
"#
    .to_string()
}

fn render_summary(report: &AnalysisReport) -> String {
    let repo = &report.repository;
    let description = repo.description.as_deref().unwrap_or("_No description_");
    let language = repo.primary_language.as_deref().unwrap_or("Unknown");

    let mut section = format!(
        r#"## Summary

{}

| Metric | Value |
|--------|-------|
| Primary Language | {} |
| Files | {} |
| Directories | {} |
| Commits Analyzed | {} |
| Contributors | {} |
| Stars | {} |
"#,
        description,
        language,
        repo.total_files,
        repo.total_directories,
        repo.total_commits,
        repo.total_contributors,
        repo.stars
    );

    if !repo.languages.is_empty() {
        let mut languages: Vec<(&String, &f64)> = repo.languages.iter().collect();
        languages.sort_by(|a, b| b.1.total_cmp(a.1));
        let breakdown: Vec<String> = languages
            .iter()
            .map(|(name, pct)| format!("{} {:.1}%", name, pct))
            .collect();
        section.push_str(&format!("\nLanguages: {}\n", breakdown.join(", ")));
    }

    section
}

fn render_category_scores(report: &AnalysisReport) -> String {
    let rows = [
        ("Quality", report.quality.overall_quality_score),
        ("Principles", report.principles.principle_score),
        ("Collaboration", report.collaboration.collaboration_score),
        ("Architecture", report.architecture_score),
    ];

    let mut section =
        String::from("## Category Scores\n\n| Category | Score | Status |\n|----------|-------|--------|\n");
    for (name, score) in rows {
        section.push_str(&format!(
            "| {} | {:.1}/100 | {} |\n",
            name,
            score,
            score_indicator(score)
        ));
    }
    section
}

fn render_architecture(report: &AnalysisReport) -> String {
    let architecture = &report.architecture;
    let mut section = String::from("## Architecture\n\n");

    match architecture.primary_signal() {
        Some(signal) => section.push_str(&format!(
            "**Primary pattern:** {} ({:.0}% confidence, {})\n\n",
            signal.pattern,
            signal.confidence,
            signal.confidence_level()
        )),
        None => section.push_str("No architecture pattern reached the detection threshold.\n\n"),
    }

    section.push_str("| Pattern | Confidence | Level |\n|---------|------------|-------|\n");
    for signal in &architecture.signals {
        section.push_str(&format!(
            "| {} | {:.0}% | {} |\n",
            signal.pattern,
            signal.confidence,
            signal.confidence_level()
        ));
    }

    for (pattern, evidence) in architecture.evidence_by_pattern() {
        section.push_str(&format!("\n**{}**\n\n", pattern));
        for item in evidence {
            section.push_str(&format!("- {}\n", item));
        }
    }

    section
}

fn render_quality(report: &AnalysisReport) -> String {
    let quality = &report.quality;
    let files = &quality.file_metrics;
    let tests = &quality.test_metrics;

    let mut section = format!(
        r#"## Code Quality

**Grade: {}** ({})

| Metric | Value |
|--------|-------|
| Complexity Score | {:.1} |
| Test Score | {:.1} |
| Documentation Score | {:.1} |
| Estimated Lines | {} |
| Average File Length | {:.0} |
| Large Files | {} |
| Test Files | {} ({:.1}%) |
"#,
        quality.grade(),
        quality.quality_level(),
        quality.complexity_score,
        quality.test_score,
        quality.documentation_score,
        files.total_lines,
        files.avg_file_length,
        files.large_files_count,
        tests.test_files_count,
        tests.test_ratio * 100.0
    );

    if !quality.strengths.is_empty() {
        section.push_str("\n### Strengths\n\n");
        for strength in &quality.strengths {
            section.push_str(&format!("- ✅ {}\n", strength));
        }
    }
    if !quality.issues.is_empty() {
        section.push_str("\n### Issues\n\n");
        for issue in &quality.issues {
            section.push_str(&format!("- ⚠️ {}\n", issue));
        }
    }

    section
}

fn render_violations(report: &AnalysisReport) -> String {
    let principles = &report.principles;
    let mut section = format!(
        "## Principle Violations\n\n**Score: {:.1}/100** | **Grade: {}** | {} violations ({} high)\n",
        principles.principle_score,
        principles.grade(),
        principles.total_violations,
        principles.high_severity_count
    );

    if principles.violations.is_empty() {
        section.push_str("\n🎉 No violations found.\n");
        return section;
    }

    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        let matching: Vec<_> = principles
            .violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect();
        if matching.is_empty() {
            continue;
        }

        section.push_str(&format!(
            "\n### {} {} ({})\n\n",
            severity_emoji(severity),
            severity,
            matching.len()
        ));
        section.push_str("| Principle | File | Description | Suggestion |\n");
        section.push_str("|-----------|------|-------------|------------|\n");
        for violation in matching.iter().take(MAX_VIOLATIONS_PER_SEVERITY) {
            section.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                violation.principle,
                violation
                    .file_path
                    .as_deref()
                    .map(|p| format!("`{}`", p))
                    .unwrap_or_else(|| "-".to_string()),
                escape_pipes(&violation.description),
                escape_pipes(&violation.suggestion)
            ));
        }
        if matching.len() > MAX_VIOLATIONS_PER_SEVERITY {
            section.push_str(&format!(
                "\n_...and {} more_\n",
                matching.len() - MAX_VIOLATIONS_PER_SEVERITY
            ));
        }
    }

    section
}

fn render_collaboration(report: &AnalysisReport) -> String {
    let collaboration = &report.collaboration;
    let mut section = format!(
        r#"## Collaboration

**Score: {:.1}/100** | **Level: {}**

| Metric | Value |
|--------|-------|
| Bus Factor | {} ({}) |
| Active Contributors | {} |
| Commits per Week | {:.1} |
| Top Contributor Share | {:.1}% |
"#,
        collaboration.collaboration_score,
        collaboration.collaboration_level(),
        collaboration.bus_factor,
        collaboration.bus_factor_severity(),
        collaboration.active_contributors,
        collaboration.commit_frequency,
        collaboration.ownership_concentration
    );

    if !collaboration.top_contributors.is_empty() {
        section.push_str("\n| Contributor | Commits | Share | Key |\n");
        section.push_str("|-------------|---------|-------|-----|\n");
        for contributor in &collaboration.top_contributors {
            section.push_str(&format!(
                "| {} | {} | {:.1}% | {} |\n",
                contributor.name,
                contributor.commits,
                contributor.percentage,
                if contributor.is_key_contributor { "yes" } else { "" }
            ));
        }
    }

    if collaboration.has_bus_factor_risk {
        section.push_str("\n> ⚠️ Knowledge is concentrated in few contributors.\n");
    }

    section
}

fn render_footer(report: &AnalysisReport) -> String {
    format!(
        r#"---

*Generated by repoinsight (scoring v{}, weights {:.2}/{:.2}/{:.2})*
"#,
        report.scoring_version,
        report.weights.quality,
        report.weights.principles,
        report.weights.collaboration
    )
}

fn score_indicator(score: f64) -> &'static str {
    if score >= 80.0 {
        "✅ Good"
    } else if score >= 60.0 {
        "⚠️ Fair"
    } else {
        "❌ Poor"
    }
}

fn severity_emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🔵",
    }
}

/// Pipes would split a table cell
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
