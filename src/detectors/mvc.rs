//! MVC detector
//!
//! Looks for the Model-View-Controller split common to Rails, Django and
//! Laravel projects:
//! - models/ 35 points
//! - views/ 35 points
//! - controllers/ 25 points
//! - routes/ 5 points
//!
//! An `app/` directory next to models or views is recorded as extra
//! evidence without points.

use crate::detectors::base::{
    ArchitecturePattern, ArchitectureSignal, FolderIndex, PatternDetector, SignalBuilder,
};

pub struct MvcDetector;

impl MvcDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MvcDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for MvcDetector {
    fn pattern(&self) -> ArchitecturePattern {
        ArchitecturePattern::Mvc
    }

    fn score(&self, folders: &FolderIndex) -> ArchitectureSignal {
        let mut signal = SignalBuilder::new(self.pattern());

        let has_models = folders.has("models");
        if has_models {
            signal.award(35.0, "Has models/ directory (data layer)", "has_models");
        }

        let has_views = folders.has("views");
        if has_views {
            signal.award(35.0, "Has views/ directory (presentation layer)", "has_views");
        }

        if folders.has("controllers") {
            signal.award(
                25.0,
                "Has controllers/ directory (business logic)",
                "has_controllers",
            );
        }

        if folders.has("routes") {
            signal.award(5.0, "Has routes/ directory (URL mapping)", "has_routes");
        }

        if folders.has("app") && (has_models || has_views) {
            signal.note("Has app/ directory (Rails/Laravel style)");
        }

        signal.finish("No MVC structure detected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileEntry, RepoSnapshot};

    fn snapshot_with_dirs(dirs: &[&str]) -> RepoSnapshot {
        let mut snapshot = RepoSnapshot::new("test", "mvc-app");
        snapshot.files = dirs.iter().map(|d| FileEntry::dir(*d)).collect();
        snapshot
    }

    #[test]
    fn test_full_mvc() {
        let snapshot = snapshot_with_dirs(&["models", "views", "controllers", "routes"]);
        let signal = MvcDetector::new().detect(&snapshot);

        assert_eq!(signal.pattern, ArchitecturePattern::Mvc);
        assert_eq!(signal.confidence, 100.0);
        assert_eq!(signal.evidence.len(), 4);
        assert!(signal.flag("has_models"));
        assert!(signal.flag("has_views"));
        assert!(signal.flag("has_controllers"));
        assert!(signal.flag("has_routes"));
    }

    #[test]
    fn test_models_and_views_only() {
        let snapshot = snapshot_with_dirs(&["models", "views"]);
        let signal = MvcDetector::new().detect(&snapshot);

        assert_eq!(signal.confidence, 70.0);
        assert!(signal.flag("has_models"));
        assert!(signal.flag("has_views"));
        assert!(!signal.flag("has_controllers"));
        assert!(!signal.indicators.contains_key("has_controllers"));
    }

    #[test]
    fn test_app_dir_is_evidence_without_points() {
        let snapshot = snapshot_with_dirs(&["app", "app/models"]);
        let signal = MvcDetector::new().detect(&snapshot);

        assert_eq!(signal.confidence, 35.0);
        assert_eq!(signal.evidence.len(), 2);
        assert!(signal.evidence[1].contains("app/"));
    }

    #[test]
    fn test_nested_and_uppercase_directories() {
        let snapshot = snapshot_with_dirs(&["src/main/Models", "src/main/VIEWS"]);
        let signal = MvcDetector::new().detect(&snapshot);
        assert_eq!(signal.confidence, 70.0);
    }

    #[test]
    fn test_not_detected() {
        let snapshot = snapshot_with_dirs(&["src", "lib"]);
        let signal = MvcDetector::new().detect(&snapshot);

        assert_eq!(signal.confidence, 0.0);
        assert_eq!(signal.evidence, vec!["No MVC structure detected".to_string()]);
        assert!(signal.indicators.is_empty());
    }
}
