//! Clean Architecture detector
//!
//! Dependencies point inward: domain at the core, use cases around it,
//! infrastructure and adapters at the edge.

use crate::detectors::base::{
    ArchitecturePattern, ArchitectureSignal, FolderIndex, PatternDetector, SignalBuilder,
};

const DOMAIN_DIRS: &[&str] = &["domain", "entities", "core"];
const APPLICATION_DIRS: &[&str] = &["application", "usecases", "use_cases"];
const INFRASTRUCTURE_DIRS: &[&str] = &["infrastructure"];
const INTERFACE_DIRS: &[&str] = &["interfaces", "adapters", "ports"];

pub struct CleanArchitectureDetector;

impl CleanArchitectureDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CleanArchitectureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for CleanArchitectureDetector {
    fn pattern(&self) -> ArchitecturePattern {
        ArchitecturePattern::CleanArchitecture
    }

    fn score(&self, folders: &FolderIndex) -> ArchitectureSignal {
        let mut signal = SignalBuilder::new(self.pattern());

        if folders.has_any(DOMAIN_DIRS) {
            signal.award(
                40.0,
                "Has domain/entities layer (core business logic)",
                "has_domain",
            );
        }

        if folders.has_any(APPLICATION_DIRS) {
            signal.award(30.0, "Has application/usecases layer", "has_application");
        }

        if folders.has_any(INFRASTRUCTURE_DIRS) {
            signal.award(
                20.0,
                "Has infrastructure layer (external concerns)",
                "has_infrastructure",
            );
        }

        if folders.has_any(INTERFACE_DIRS) {
            signal.award(
                10.0,
                "Has interfaces/adapters (dependency inversion)",
                "has_interfaces",
            );
        }

        signal.finish("No Clean Architecture structure detected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileEntry, RepoSnapshot};

    fn detect(dirs: &[&str]) -> ArchitectureSignal {
        let mut snapshot = RepoSnapshot::new("test", "clean-app");
        snapshot.files = dirs.iter().map(|d| FileEntry::dir(*d)).collect();
        CleanArchitectureDetector::new().detect(&snapshot)
    }

    #[test]
    fn test_full_clean_architecture() {
        let signal = detect(&["domain", "application", "infrastructure", "interfaces"]);
        assert_eq!(signal.pattern, ArchitecturePattern::CleanArchitecture);
        assert_eq!(signal.confidence, 100.0);
        assert!(signal.flag("has_domain"));
        assert!(signal.flag("has_application"));
        assert!(signal.flag("has_infrastructure"));
        assert!(signal.flag("has_interfaces"));
    }

    #[test]
    fn test_alternate_layer_names() {
        let signal = detect(&["src/entities", "src/use_cases", "src/adapters"]);
        assert_eq!(signal.confidence, 80.0);
        assert!(!signal.flag("has_infrastructure"));
    }

    #[test]
    fn test_domain_counted_once() {
        let signal = detect(&["domain", "entities", "core"]);
        assert_eq!(signal.confidence, 40.0);
        assert_eq!(signal.evidence.len(), 1);
    }

    #[test]
    fn test_not_detected() {
        let signal = detect(&[]);
        assert_eq!(signal.confidence, 0.0);
        assert_eq!(
            signal.evidence,
            vec!["No Clean Architecture structure detected".to_string()]
        );
    }
}
