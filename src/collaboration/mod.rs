//! Collaboration health analysis
//!
//! Commit shares are computed from the ingested commit window, not from the
//! roster's own `commit_count`, so the numbers describe recent activity.
//!
//! # Contributor identity
//!
//! Every roster entry gets a bucket, in roster order. A commit is credited
//! to the first roster entry whose display name or username equals the
//! commit author, else whose email matches the commit email
//! (case-insensitive). Authors that match nobody get a bucket of their own,
//! in first-seen order.
//!
//! # Bus factor
//!
//! The smallest number of top-ranked contributors whose commits together
//! reach half of all analyzed commits.

use crate::analyzer::Analyzer;
use crate::models::{round1, CommitEntry, ContributorEntry, RepoSnapshot};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Share (percent) at or above which a contributor is "key"
pub const KEY_CONTRIBUTOR_THRESHOLD: f64 = 20.0;
/// Share (percent) at or above which a contributor is "active"
pub const ACTIVE_CONTRIBUTOR_THRESHOLD: f64 = 5.0;
/// Bus factor below which knowledge concentration is flagged
pub const BUS_FACTOR_RISK_THRESHOLD: usize = 3;

const TOP_CONTRIBUTORS: usize = 5;
/// Bucket for commits whose author is blank
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorStats {
    pub name: String,
    pub commits: usize,
    /// Share of analyzed commits, 0-100
    pub percentage: f64,
    pub is_key_contributor: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollaborationMetrics {
    pub total_commits: usize,
    /// Distinct contributor buckets (roster plus unmatched authors)
    pub total_contributors: usize,
    /// Commits per week since repository creation
    pub commit_frequency: f64,
    pub bus_factor: usize,
    /// Up to five highest-ranked contributors
    pub top_contributors: Vec<ContributorStats>,
    /// Share of the top contributor, 0-100
    pub ownership_concentration: f64,
    pub collaboration_score: f64,
    pub has_bus_factor_risk: bool,
    pub active_contributors: usize,
}

impl CollaborationMetrics {
    pub fn grade(&self) -> &'static str {
        let score = self.collaboration_score;
        if score >= 90.0 {
            "A"
        } else if score >= 80.0 {
            "B"
        } else if score >= 70.0 {
            "C"
        } else if score >= 60.0 {
            "D"
        } else {
            "F"
        }
    }

    pub fn collaboration_level(&self) -> &'static str {
        let score = self.collaboration_score;
        if score >= 85.0 {
            "Excellent"
        } else if score >= 70.0 {
            "Good"
        } else if score >= 55.0 {
            "Fair"
        } else {
            "Poor"
        }
    }

    pub fn bus_factor_severity(&self) -> &'static str {
        if self.bus_factor >= 5 {
            "LOW"
        } else if self.bus_factor >= BUS_FACTOR_RISK_THRESHOLD {
            "MEDIUM"
        } else {
            "HIGH"
        }
    }

    pub fn to_dict(&self) -> serde_json::Value {
        let top: Vec<serde_json::Value> = self
            .top_contributors
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "commits": c.commits,
                    "percentage": round1(c.percentage),
                    "is_key": c.is_key_contributor,
                })
            })
            .collect();

        serde_json::json!({
            "collaboration_score": round1(self.collaboration_score),
            "grade": self.grade(),
            "level": self.collaboration_level(),
            "total_commits": self.total_commits,
            "total_contributors": self.total_contributors,
            "commit_frequency": round1(self.commit_frequency),
            "bus_factor": self.bus_factor,
            "bus_factor_severity": self.bus_factor_severity(),
            "has_bus_factor_risk": self.has_bus_factor_risk,
            "ownership_concentration": round1(self.ownership_concentration),
            "active_contributors": self.active_contributors,
            "top_contributors": top,
        })
    }
}

/// Analyzes commit distribution, bus factor and ownership
#[derive(Debug, Clone, Default)]
pub struct CollaborationAnalyzer {
    /// Fixed "now" for commit frequency; wall clock when unset
    reference_time: Option<DateTime<Utc>>,
}

impl CollaborationAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure repository age against `as_of` instead of the wall clock
    pub fn with_reference_time(as_of: DateTime<Utc>) -> Self {
        Self {
            reference_time: Some(as_of),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }
}

impl Analyzer for CollaborationAnalyzer {
    type Output = CollaborationMetrics;

    fn name(&self) -> &'static str {
        "collaboration"
    }

    fn analyze(&self, snapshot: &RepoSnapshot) -> CollaborationMetrics {
        if snapshot.commits.is_empty() {
            debug!("Collaboration: no commits");
            return CollaborationMetrics {
                total_contributors: snapshot.contributors.len(),
                has_bus_factor_risk: true,
                ..Default::default()
            };
        }

        let total_commits = snapshot.commits.len();
        let ranked = rank_contributors(&snapshot.commits, &snapshot.contributors);
        let bus_factor = bus_factor(&ranked, total_commits);
        let active = ranked
            .iter()
            .filter(|c| c.percentage >= ACTIVE_CONTRIBUTOR_THRESHOLD)
            .count();
        let ownership = ranked.first().map_or(0.0, |c| c.percentage);
        let total_contributors = ranked.len();

        let score = collaboration_score(bus_factor, ownership, active, total_contributors);
        let frequency = commit_frequency(snapshot, self.now());

        debug!(
            "Collaboration: {} commits, bus factor {}, ownership {:.1}%, score {:.1}",
            total_commits, bus_factor, ownership, score
        );

        CollaborationMetrics {
            total_commits,
            total_contributors,
            commit_frequency: frequency,
            bus_factor,
            top_contributors: ranked.into_iter().take(TOP_CONTRIBUTORS).collect(),
            ownership_concentration: ownership,
            collaboration_score: score,
            has_bus_factor_risk: bus_factor < BUS_FACTOR_RISK_THRESHOLD,
            active_contributors: active,
        }
    }
}

/// Credit commits to contributor buckets and rank them by commit count.
///
/// The sort is stable, so equal counts keep roster order followed by
/// first-seen order for unmatched authors.
pub fn rank_contributors(
    commits: &[CommitEntry],
    roster: &[ContributorEntry],
) -> Vec<ContributorStats> {
    let mut buckets: IndexMap<String, usize> = IndexMap::new();
    let mut roster_slots: Vec<usize> = Vec::with_capacity(roster.len());
    for entry in roster {
        let (slot, _) = buckets.insert_full(entry.display_name().to_string(), 0);
        roster_slots.push(slot);
    }

    for commit in commits {
        let slot = match find_roster_entry(commit, roster) {
            Some(index) => roster_slots[index],
            None => {
                let author = bucket_name(commit);
                match buckets.get_index_of(author) {
                    Some(index) => index,
                    None => buckets.insert_full(author.to_string(), 0).0,
                }
            }
        };
        if let Some((_, count)) = buckets.get_index_mut(slot) {
            *count += 1;
        }
    }

    let total = commits.len();
    let mut stats: Vec<ContributorStats> = buckets
        .into_iter()
        .map(|(name, commits)| {
            let percentage = if total > 0 {
                commits as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            ContributorStats {
                name,
                commits,
                percentage,
                is_key_contributor: percentage >= KEY_CONTRIBUTOR_THRESHOLD,
            }
        })
        .collect();
    stats.sort_by(|a, b| b.commits.cmp(&a.commits));
    stats
}

fn bucket_name(commit: &CommitEntry) -> &str {
    if commit.author.trim().is_empty() {
        UNKNOWN_AUTHOR
    } else {
        &commit.author
    }
}

fn find_roster_entry(commit: &CommitEntry, roster: &[ContributorEntry]) -> Option<usize> {
    roster
        .iter()
        .position(|c| {
            !commit.author.trim().is_empty()
                && (c.display_name() == commit.author || c.username == commit.author)
        })
        .or_else(|| {
            if commit.author_email.is_empty() {
                return None;
            }
            roster
                .iter()
                .position(|c| !c.email.is_empty() && c.email.eq_ignore_ascii_case(&commit.author_email))
        })
}

/// Smallest ranked prefix holding at least half of all commits
pub fn bus_factor(ranked: &[ContributorStats], total_commits: usize) -> usize {
    if ranked.is_empty() || total_commits == 0 {
        return 0;
    }
    let threshold = total_commits as f64 * 0.5;
    let mut cumulative = 0usize;
    for (i, contributor) in ranked.iter().enumerate() {
        cumulative += contributor.commits;
        if cumulative as f64 >= threshold {
            return i + 1;
        }
    }
    ranked.len()
}

/// Commits per week; 0 when the creation time is unknown
fn commit_frequency(snapshot: &RepoSnapshot, as_of: DateTime<Utc>) -> f64 {
    let Some(age_days) = snapshot.age_days(as_of) else {
        return 0.0;
    };
    let weeks = age_days.max(1) as f64 / 7.0;
    snapshot.commits.len() as f64 / weeks
}

fn step_score(value: usize, tiers: [usize; 3]) -> f64 {
    if value >= tiers[0] {
        100.0
    } else if value >= tiers[1] {
        75.0
    } else if value >= tiers[2] {
        50.0
    } else {
        25.0
    }
}

fn ownership_score(ownership: f64) -> f64 {
    if ownership <= 30.0 {
        100.0
    } else if ownership <= 50.0 {
        75.0
    } else if ownership <= 70.0 {
        50.0
    } else {
        25.0
    }
}

fn collaboration_score(bus_factor: usize, ownership: f64, active: usize, total: usize) -> f64 {
    step_score(bus_factor, [5, 3, 2]) * 0.40
        + ownership_score(ownership) * 0.30
        + step_score(active, [5, 3, 2]) * 0.20
        + step_score(total, [10, 5, 2]) * 0.10
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(author: &str, email: &str) -> CommitEntry {
        CommitEntry {
            id: format!("{}-{}", author, email),
            message: "change".into(),
            author: author.into(),
            author_email: email.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            files_changed: None,
        }
    }

    fn member(username: &str, name: Option<&str>, email: &str) -> ContributorEntry {
        ContributorEntry {
            username: username.into(),
            name: name.map(str::to_string),
            email: email.into(),
            commit_count: 0,
            lines_added: None,
            lines_deleted: None,
        }
    }

    fn snapshot(commits: Vec<CommitEntry>, roster: Vec<ContributorEntry>) -> RepoSnapshot {
        let mut snapshot = RepoSnapshot::new("acme", "team");
        snapshot.commits = commits;
        snapshot.contributors = roster;
        snapshot
    }

    #[test]
    fn test_single_contributor() {
        let commits = (0..10).map(|_| commit("Jane", "jane@acme.io")).collect();
        let snap = snapshot(commits, vec![member("jane", Some("Jane"), "jane@acme.io")]);
        let metrics = CollaborationAnalyzer::new().analyze(&snap);

        assert_eq!(metrics.bus_factor, 1);
        assert!(metrics.has_bus_factor_risk);
        assert_eq!(metrics.ownership_concentration, 100.0);
        // 25 on every factor
        assert!((metrics.collaboration_score - 25.0).abs() < 1e-9);
        assert_eq!(metrics.bus_factor_severity(), "HIGH");
        assert_eq!(metrics.top_contributors[0].commits, 10);
        assert!(metrics.top_contributors[0].is_key_contributor);
    }

    #[test]
    fn test_zero_commits() {
        let snap = snapshot(Vec::new(), vec![member("jane", None, "")]);
        let metrics = CollaborationAnalyzer::new().analyze(&snap);

        assert_eq!(metrics.collaboration_score, 0.0);
        assert_eq!(metrics.bus_factor, 0);
        assert!(metrics.has_bus_factor_risk);
        assert_eq!(metrics.total_contributors, 1);
        assert!(metrics.top_contributors.is_empty());
    }

    #[test]
    fn test_unmatched_author_gets_own_bucket() {
        let mut commits: Vec<CommitEntry> = (0..3).map(|_| commit("Jane", "")).collect();
        commits.extend((0..5).map(|_| commit("ci-bot", "bot@ci.example")));
        let snap = snapshot(commits, vec![member("jane", Some("Jane"), "jane@acme.io")]);
        let metrics = CollaborationAnalyzer::new().analyze(&snap);

        assert_eq!(metrics.total_contributors, 2);
        assert_eq!(metrics.top_contributors[0].name, "ci-bot");
        assert_eq!(metrics.top_contributors[0].commits, 5);
        assert_eq!(metrics.top_contributors[1].name, "Jane");
        // 5 of 8 commits >= 4
        assert_eq!(metrics.bus_factor, 1);
        assert!((metrics.ownership_concentration - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_identity_by_username_and_email() {
        let commits = vec![
            commit("jdoe", ""),
            commit("John Doe (laptop)", "JOHN@ACME.IO"),
            commit("John Doe", ""),
        ];
        let roster = vec![member("jdoe", Some("John Doe"), "john@acme.io")];
        let ranked = rank_contributors(&commits, &roster);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "John Doe");
        assert_eq!(ranked[0].commits, 3);
    }

    #[test]
    fn test_roster_member_without_commits_ranked_last() {
        let commits = vec![commit("Bob", "")];
        let roster = vec![member("alice", None, ""), member("bob", Some("Bob"), "")];
        let ranked = rank_contributors(&commits, &roster);

        assert_eq!(ranked[0].name, "Bob");
        assert_eq!(ranked[1].name, "alice");
        assert_eq!(ranked[1].percentage, 0.0);
    }

    #[test]
    fn test_bus_factor_spread_team() {
        let mut commits = Vec::new();
        for (name, n) in [("a", 3), ("b", 3), ("c", 2), ("d", 1), ("e", 1)] {
            commits.extend((0..n).map(|_| commit(name, "")));
        }
        let ranked = rank_contributors(&commits, &[]);
        // 3 + 3 = 6 >= 5
        assert_eq!(bus_factor(&ranked, commits.len()), 2);
        assert!(bus_factor(&ranked, commits.len()) <= ranked.len());
    }

    #[test]
    fn test_bus_factor_grows_as_ownership_spreads() {
        let others = ["bob", "carol", "dave", "erin"];
        let mut commits: Vec<CommitEntry> = (0..10).map(|_| commit("alice", "")).collect();
        let mut previous = 0;

        // hand alice's commits to the others one at a time, down to an even split
        for moved in 0..=8 {
            if moved > 0 {
                commits[moved - 1].author = others[(moved - 1) % others.len()].to_string();
            }
            let ranked = rank_contributors(&commits, &[]);
            let factor = bus_factor(&ranked, commits.len());

            assert!(factor >= previous, "bus factor fell to {} after {} moves", factor, moved);
            assert!(factor >= 1 && factor <= ranked.len());
            previous = factor;
        }

        // 10/0 -> 1 ... 2/2/2/2/2 -> 3
        assert_eq!(previous, 3);
    }

    #[test]
    fn test_blank_author_goes_to_unknown_bucket() {
        let commits = vec![
            commit("", ""),
            commit("   ", "nobody@example.com"),
            commit("Jane", ""),
            commit("", "JANE@acme.io"),
        ];
        let roster = vec![member("jane", Some("Jane"), "jane@acme.io")];
        let ranked = rank_contributors(&commits, &roster);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Jane");
        assert_eq!(ranked[0].commits, 2);
        assert_eq!(ranked[1].name, UNKNOWN_AUTHOR);
        assert_eq!(ranked[1].commits, 2);
    }

    #[test]
    fn test_healthy_team_score() {
        let mut commits = Vec::new();
        for name in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"] {
            commits.extend((0..2).map(|_| commit(name, "")));
        }
        let metrics = CollaborationAnalyzer::new().analyze(&snapshot(commits, Vec::new()));

        assert_eq!(metrics.bus_factor, 5);
        assert_eq!(metrics.active_contributors, 10);
        assert!((metrics.collaboration_score - 100.0).abs() < 1e-9);
        assert!(!metrics.has_bus_factor_risk);
        assert_eq!(metrics.top_contributors.len(), 5);
        assert_eq!(metrics.grade(), "A");
        assert_eq!(metrics.collaboration_level(), "Excellent");
    }

    #[test]
    fn test_commit_frequency_with_reference_time() {
        let mut snap = snapshot(
            (0..14).map(|_| commit("a", "")).collect(),
            Vec::new(),
        );
        let as_of = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let analyzer = CollaborationAnalyzer::with_reference_time(as_of);
        assert_eq!(analyzer.analyze(&snap).commit_frequency, 0.0);

        snap.created_at = Some(as_of - chrono::Duration::days(14));
        assert!((analyzer.analyze(&snap).commit_frequency - 7.0).abs() < 1e-9);

        // same-day repositories use a one-day floor
        snap.created_at = Some(as_of);
        assert!((analyzer.analyze(&snap).commit_frequency - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_dict_rounds() {
        let commits = vec![commit("a", ""), commit("a", ""), commit("b", "")];
        let dict = CollaborationAnalyzer::new()
            .analyze(&snapshot(commits, Vec::new()))
            .to_dict();

        assert_eq!(dict["top_contributors"][0]["percentage"], 66.7);
        assert_eq!(dict["ownership_concentration"], 66.7);
        assert_eq!(dict["bus_factor_severity"], "HIGH");
    }
}
