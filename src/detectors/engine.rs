//! Architecture detection orchestrator
//!
//! Runs every registered [`PatternDetector`] against one shared
//! [`FolderIndex`] and picks the primary pattern:
//!
//! ```text
//! snapshot ──► FolderIndex ──┬──► MVC ──────────┐
//!                            ├──► Clean ────────┤
//!                            ├──► Layered ──────┼──► signals (registration order)
//!                            └──► FeatureBased ─┘          │
//!                                                          ▼
//!                                   primary = strictly highest confidence >= 50
//! ```
//!
//! Detectors run in parallel with rayon; `collect` keeps registration order
//! so tie-breaking stays deterministic.

use crate::analyzer::Analyzer;
use crate::detectors::base::{
    ArchitecturePattern, ArchitectureSignal, FolderIndex, PatternDetector,
    LEGACY_DETECTION_THRESHOLD,
};
use crate::detectors::{
    CleanArchitectureDetector, FeatureBasedDetector, LayeredDetector, MvcDetector,
};
use crate::models::RepoSnapshot;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Outcome of running all pattern detectors over one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitectureAnalysisResult {
    /// `None` when no signal reaches the detection threshold
    pub primary_pattern: Option<ArchitecturePattern>,
    /// Every detector's signal, in detector order
    pub signals: Vec<ArchitectureSignal>,
}

impl ArchitectureAnalysisResult {
    /// Build a result from signals in detector order
    pub fn from_signals(signals: Vec<ArchitectureSignal>) -> Self {
        let mut primary: Option<&ArchitectureSignal> = None;
        for signal in signals.iter().filter(|s| s.is_detected()) {
            // strict comparison: earlier detectors win ties
            if primary.map_or(true, |p| signal.confidence > p.confidence) {
                primary = Some(signal);
            }
        }
        let primary_pattern = primary.map(|s| s.pattern);

        Self {
            primary_pattern,
            signals,
        }
    }

    /// Signals at or above the detection threshold, highest confidence first
    pub fn detected_patterns(&self) -> Vec<&ArchitectureSignal> {
        let mut detected: Vec<&ArchitectureSignal> =
            self.signals.iter().filter(|s| s.is_detected()).collect();
        detected.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        detected
    }

    /// Signals in the weak band (40-49)
    pub fn weak_patterns(&self) -> Vec<&ArchitectureSignal> {
        self.signals
            .iter()
            .filter(|s| s.is_weak_detection())
            .collect()
    }

    pub fn has_clear_architecture(&self) -> bool {
        self.primary_pattern.is_some()
    }

    pub fn primary_signal(&self) -> Option<&ArchitectureSignal> {
        self.primary_pattern.and_then(|p| self.signal_for(p))
    }

    /// Confidence of the primary pattern, 0 when none was detected
    pub fn architecture_score(&self) -> f64 {
        self.primary_signal().map_or(0.0, |s| s.confidence)
    }

    pub fn signal_for(&self, pattern: ArchitecturePattern) -> Option<&ArchitectureSignal> {
        self.signals.iter().find(|s| s.pattern == pattern)
    }

    /// Pattern name to confidence, in detector order
    pub fn confidence_scores(&self) -> IndexMap<&'static str, f64> {
        self.signals
            .iter()
            .map(|s| (s.pattern.as_str(), s.confidence))
            .collect()
    }

    /// Evidence for every pattern at or above the coarse threshold (30)
    pub fn evidence_by_pattern(&self) -> IndexMap<&'static str, Vec<String>> {
        self.signals
            .iter()
            .filter(|s| s.confidence >= LEGACY_DETECTION_THRESHOLD)
            .map(|s| (s.pattern.as_str(), s.evidence.clone()))
            .collect()
    }

    pub fn to_dict(&self) -> serde_json::Value {
        let detected: Vec<serde_json::Value> = self
            .detected_patterns()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "pattern": s.pattern.as_str(),
                    "confidence": s.confidence,
                })
            })
            .collect();
        let signals: Vec<serde_json::Value> = self.signals.iter().map(|s| s.to_dict()).collect();

        serde_json::json!({
            "primary_pattern": self.primary_pattern.map(|p| p.as_str()),
            "detected_patterns": detected,
            "has_clear_architecture": self.has_clear_architecture(),
            "confidence_scores": self.confidence_scores(),
            "signals": signals,
        })
    }
}

/// Runs the ordered detector set
pub struct ArchitectureAnalyzer {
    detectors: Vec<Box<dyn PatternDetector>>,
}

impl ArchitectureAnalyzer {
    /// Analyzer with the four built-in detectors in tie-break order
    pub fn new() -> Self {
        Self {
            detectors: vec![
                Box::new(MvcDetector::new()),
                Box::new(CleanArchitectureDetector::new()),
                Box::new(LayeredDetector::new()),
                Box::new(FeatureBasedDetector::new()),
            ],
        }
    }

    /// Analyzer with a caller-supplied detector list; order decides ties
    pub fn with_detectors(detectors: Vec<Box<dyn PatternDetector>>) -> Self {
        Self { detectors }
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }
}

impl Default for ArchitectureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ArchitectureAnalyzer {
    type Output = ArchitectureAnalysisResult;

    fn name(&self) -> &'static str {
        "architecture"
    }

    fn analyze(&self, snapshot: &RepoSnapshot) -> ArchitectureAnalysisResult {
        let folders = FolderIndex::from_snapshot(snapshot);

        let signals: Vec<ArchitectureSignal> = self
            .detectors
            .par_iter()
            .map(|detector| detector.score(&folders))
            .collect();

        for signal in &signals {
            debug!("{}: confidence {:.0}", signal.pattern, signal.confidence);
        }

        let result = ArchitectureAnalysisResult::from_signals(signals);
        debug!(
            "Primary architecture: {}",
            result
                .primary_pattern
                .map_or("none", |p| p.as_str())
        );
        result
    }
}
