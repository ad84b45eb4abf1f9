//! Base detector trait and types
//!
//! This module defines the core abstractions for architecture detection:
//! - `PatternDetector` trait that all detectors must implement
//! - `ArchitectureSignal` for capturing one detector's verdict
//! - `FolderIndex` for the case-insensitive directory lookups every
//!   detector needs

use crate::models::RepoSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Confidence at or above which a pattern counts as detected
pub const DETECTION_THRESHOLD: f64 = 50.0;

/// Lower bound of the weak-presence band (up to the detection threshold)
pub const WEAK_THRESHOLD: f64 = 40.0;

/// Coarser threshold kept for evidence aggregation
pub const LEGACY_DETECTION_THRESHOLD: f64 = 30.0;

/// Confidence ceiling
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Architectural styles the engine knows how to recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArchitecturePattern {
    #[serde(rename = "MVC")]
    Mvc,
    #[serde(rename = "Clean Architecture")]
    CleanArchitecture,
    #[serde(rename = "Layered Architecture")]
    Layered,
    #[serde(rename = "Feature-Based Architecture")]
    FeatureBased,
}

impl ArchitecturePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitecturePattern::Mvc => "MVC",
            ArchitecturePattern::CleanArchitecture => "Clean Architecture",
            ArchitecturePattern::Layered => "Layered Architecture",
            ArchitecturePattern::FeatureBased => "Feature-Based Architecture",
        }
    }
}

impl std::fmt::Display for ArchitecturePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived fact recorded by a detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indicator {
    Flag(bool),
    Count(usize),
    Names(Vec<String>),
}

/// Result of running a single pattern detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureSignal {
    pub pattern: ArchitecturePattern,
    /// 0-100
    pub confidence: f64,
    /// Human-readable observations, in the order they were made
    pub evidence: Vec<String>,
    pub indicators: BTreeMap<String, Indicator>,
}

impl ArchitectureSignal {
    /// A signal with no supporting evidence
    pub fn not_detected(pattern: ArchitecturePattern, message: impl Into<String>) -> Self {
        Self {
            pattern,
            confidence: 0.0,
            evidence: vec![message.into()],
            indicators: BTreeMap::new(),
        }
    }

    /// Confidence >= 50
    pub fn is_detected(&self) -> bool {
        self.confidence >= DETECTION_THRESHOLD
    }

    /// Confidence in [40, 50)
    pub fn is_weak_detection(&self) -> bool {
        self.confidence >= WEAK_THRESHOLD && self.confidence < DETECTION_THRESHOLD
    }

    pub fn confidence_level(&self) -> &'static str {
        if self.confidence >= 90.0 {
            "Very Strong"
        } else if self.confidence >= DETECTION_THRESHOLD {
            "Strong"
        } else if self.confidence >= WEAK_THRESHOLD {
            "Weak"
        } else {
            "Not Detected"
        }
    }

    /// Boolean indicator lookup; absent indicators read as `false`
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.indicators.get(key), Some(Indicator::Flag(true)))
    }

    /// Plain key/value projection
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "pattern": self.pattern.as_str(),
            "confidence": self.confidence,
            "confidence_level": self.confidence_level(),
            "evidence": self.evidence,
            "indicators": self.indicators,
        })
    }
}

/// Accumulates points and evidence for one detector run
#[derive(Debug)]
pub(crate) struct SignalBuilder {
    pattern: ArchitecturePattern,
    confidence: f64,
    evidence: Vec<String>,
    indicators: BTreeMap<String, Indicator>,
}

impl SignalBuilder {
    pub(crate) fn new(pattern: ArchitecturePattern) -> Self {
        Self {
            pattern,
            confidence: 0.0,
            evidence: Vec::new(),
            indicators: BTreeMap::new(),
        }
    }

    /// Award points with a flag indicator
    pub(crate) fn award(&mut self, points: f64, evidence: impl Into<String>, flag: &str) {
        self.confidence += points;
        self.evidence.push(evidence.into());
        self.indicators.insert(flag.to_string(), Indicator::Flag(true));
    }

    pub(crate) fn add_points(&mut self, points: f64) {
        self.confidence += points;
    }

    /// Record evidence without awarding points
    pub(crate) fn note(&mut self, evidence: impl Into<String>) {
        self.evidence.push(evidence.into());
    }

    pub(crate) fn indicator(&mut self, key: &str, value: Indicator) {
        self.indicators.insert(key.to_string(), value);
    }

    /// Cap confidence and substitute the "not detected" message when empty
    pub(crate) fn finish(self, not_detected: &str) -> ArchitectureSignal {
        if self.evidence.is_empty() {
            return ArchitectureSignal::not_detected(self.pattern, not_detected);
        }
        ArchitectureSignal {
            pattern: self.pattern,
            confidence: self.confidence.min(MAX_CONFIDENCE),
            evidence: self.evidence,
            indicators: self.indicators,
        }
    }
}

/// Case-insensitive set of directory names present in a snapshot
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    names: BTreeSet<String>,
}

impl FolderIndex {
    pub fn from_snapshot(snapshot: &RepoSnapshot) -> Self {
        Self {
            names: snapshot.directory_names(),
        }
    }

    /// A directory named exactly `name` (any case) exists at any depth
    pub fn has(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn has_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.has(n))
    }

    /// Directory names that appear in `vocabulary`, sorted
    pub fn matching(&self, vocabulary: &[&str]) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| vocabulary.iter().any(|v| *v == name.as_str()))
            .cloned()
            .collect()
    }
}

/// Trait for all architecture pattern detectors
///
/// Detectors look at directory names only. A detector that finds nothing
/// returns confidence 0 with a single "not detected" evidence string; it
/// never fails.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyDetector;
///
/// impl PatternDetector for MyDetector {
///     fn pattern(&self) -> ArchitecturePattern {
///         ArchitecturePattern::Mvc
///     }
///
///     fn score(&self, folders: &FolderIndex) -> ArchitectureSignal {
///         let mut signal = SignalBuilder::new(self.pattern());
///         if folders.has("models") {
///             signal.award(35.0, "Has models/ directory", "has_models");
///         }
///         signal.finish("No MVC structure detected")
///     }
/// }
/// ```
pub trait PatternDetector: Send + Sync {
    /// Pattern this detector scores
    fn pattern(&self) -> ArchitecturePattern;

    /// Score the pattern against a pre-built folder index
    fn score(&self, folders: &FolderIndex) -> ArchitectureSignal;

    /// Run detection on a snapshot
    fn detect(&self, snapshot: &RepoSnapshot) -> ArchitectureSignal {
        self.score(&FolderIndex::from_snapshot(snapshot))
    }
}
