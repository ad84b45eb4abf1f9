//! Feature-based (vertical slice) architecture detector
//!
//! Scoring:
//! - modules/, features/ or apps/ parent directory: 30 points
//! - two or more directories named after domain nouns: 40 points
//! - any directory named after a domain noun: 30 points

use crate::detectors::base::{
    ArchitecturePattern, ArchitectureSignal, FolderIndex, Indicator, PatternDetector,
    SignalBuilder,
};

const PARENT_DIRS: &[&str] = &["modules", "features", "apps"];

/// Directory names that suggest a business capability slice
const FEATURE_NAMES: &[&str] = &[
    "user",
    "users",
    "auth",
    "authentication",
    "product",
    "products",
    "order",
    "orders",
    "payment",
    "payments",
    "billing",
    "profile",
    "account",
    "cart",
    "checkout",
];

pub struct FeatureBasedDetector;

impl FeatureBasedDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FeatureBasedDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for FeatureBasedDetector {
    fn pattern(&self) -> ArchitecturePattern {
        ArchitecturePattern::FeatureBased
    }

    fn score(&self, folders: &FolderIndex) -> ArchitectureSignal {
        let mut signal = SignalBuilder::new(self.pattern());

        if folders.has_any(PARENT_DIRS) {
            signal.award(
                30.0,
                "Has modules/features parent directory",
                "has_modules_parent",
            );
        }

        let features = folders.matching(FEATURE_NAMES);

        if features.len() >= 2 {
            let shown: Vec<&str> = features.iter().take(3).map(String::as_str).collect();
            signal.add_points(40.0);
            signal.note(format!(
                "Has {} feature modules: {}",
                features.len(),
                shown.join(", ")
            ));
            signal.indicator("feature_count", Indicator::Count(features.len()));
            signal.indicator("features", Indicator::Names(features.clone()));
        }

        if !features.is_empty() {
            signal.award(30.0, "Uses domain-driven feature names", "has_domain_features");
        }

        signal.finish("No feature-based architecture detected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileEntry, RepoSnapshot};

    fn detect(dirs: &[&str]) -> ArchitectureSignal {
        let mut snapshot = RepoSnapshot::new("test", "feature-app");
        snapshot.files = dirs.iter().map(|d| FileEntry::dir(*d)).collect();
        FeatureBasedDetector::new().detect(&snapshot)
    }

    #[test]
    fn test_feature_dirs_without_parent() {
        let signal = detect(&["users", "products", "orders", "auth"]);
        assert_eq!(signal.confidence, 70.0);
        assert_eq!(signal.indicators["feature_count"], Indicator::Count(4));
        match &signal.indicators["features"] {
            Indicator::Names(names) => assert!(names.contains(&"users".to_string())),
            other => panic!("unexpected indicator {:?}", other),
        }
        assert!(!signal.flag("has_modules_parent"));
    }

    #[test]
    fn test_parent_dir_caps_at_100() {
        let signal = detect(&["modules", "modules/users", "modules/billing"]);
        assert_eq!(signal.confidence, 100.0);
        assert!(signal.flag("has_modules_parent"));
    }

    #[test]
    fn test_single_feature_name() {
        let signal = detect(&["apps", "apps/cart"]);
        assert_eq!(signal.confidence, 60.0);
        assert!(!signal.indicators.contains_key("feature_count"));
        assert!(signal.flag("has_domain_features"));
    }

    #[test]
    fn test_evidence_lists_first_three_sorted() {
        let signal = detect(&["users", "orders", "auth", "cart"]);
        assert_eq!(signal.evidence[0], "Has 4 feature modules: auth, cart, orders");
    }

    #[test]
    fn test_not_detected() {
        let signal = detect(&["src", "lib"]);
        assert_eq!(signal.confidence, 0.0);
        assert_eq!(
            signal.evidence,
            vec!["No feature-based architecture detected".to_string()]
        );
    }
}
