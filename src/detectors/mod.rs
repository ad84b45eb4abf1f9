//! Architecture pattern detectors
//!
//! Every detector infers one architectural style from directory names
//! alone and reports an [`ArchitectureSignal`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ArchitectureAnalyzer                      │
//! │  - Builds one FolderIndex per snapshot                      │
//! │  - Runs detectors in parallel (rayon)                       │
//! │  - Picks the primary pattern                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PatternDetector Trait                     │
//! │  - pattern(): which style is scored                         │
//! │  - score(folders): points for named directories             │
//! │  - detect(snapshot): convenience wrapper                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Detectors
//!
//! - `MvcDetector` - models/views/controllers/routes
//! - `CleanArchitectureDetector` - domain/application/infrastructure/interfaces
//! - `LayeredDetector` - presentation/business/data tiers
//! - `FeatureBasedDetector` - vertical slices named after domain nouns
//!
//! # Usage
//!
//! ```ignore
//! use repoinsight::analyzer::Analyzer;
//! use repoinsight::detectors::ArchitectureAnalyzer;
//!
//! let result = ArchitectureAnalyzer::new().analyze(&snapshot);
//! if let Some(pattern) = result.primary_pattern {
//!     println!("{} ({:.0}%)", pattern, result.architecture_score());
//! }
//! ```

mod base;
mod clean_architecture;
mod engine;
mod feature_based;
mod layered;
mod mvc;

pub use base::{
    ArchitecturePattern, ArchitectureSignal, FolderIndex, Indicator, PatternDetector,
    DETECTION_THRESHOLD, LEGACY_DETECTION_THRESHOLD, MAX_CONFIDENCE, WEAK_THRESHOLD,
};
pub use clean_architecture::CleanArchitectureDetector;
pub use engine::{ArchitectureAnalysisResult, ArchitectureAnalyzer};
pub use feature_based::FeatureBasedDetector;
pub use layered::LayeredDetector;
pub use mvc::MvcDetector;
