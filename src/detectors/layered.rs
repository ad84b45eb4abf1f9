//! Layered (N-tier) architecture detector

use crate::detectors::base::{
    ArchitecturePattern, ArchitectureSignal, FolderIndex, PatternDetector, SignalBuilder,
};

const PRESENTATION_DIRS: &[&str] = &["presentation", "ui", "views", "frontend", "web"];
const BUSINESS_DIRS: &[&str] = &["business", "service", "services", "logic", "core"];
const DATA_DIRS: &[&str] = &["data", "dal", "persistence", "repository", "repositories"];

pub struct LayeredDetector;

impl LayeredDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LayeredDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for LayeredDetector {
    fn pattern(&self) -> ArchitecturePattern {
        ArchitecturePattern::Layered
    }

    fn score(&self, folders: &FolderIndex) -> ArchitectureSignal {
        let mut signal = SignalBuilder::new(self.pattern());

        if folders.has_any(PRESENTATION_DIRS) {
            signal.award(30.0, "Has presentation/ui layer", "has_presentation");
        }
        if folders.has_any(BUSINESS_DIRS) {
            signal.award(35.0, "Has business/service layer", "has_business");
        }
        if folders.has_any(DATA_DIRS) {
            signal.award(35.0, "Has data/persistence layer", "has_data");
        }

        signal.finish("No layered architecture detected")
    }
}
