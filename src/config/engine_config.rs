//! Engine configuration support
//!
//! Loads configuration from `repoinsight.toml` or `.repoinsightrc.json`
//! in a directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # repoinsight.toml
//!
//! [scoring.weights]
//! quality = 0.40
//! principles = 0.35
//! collaboration = 0.25
//!
//! [execution]
//! parallel = true
//! workers = 4
//!
//! [defaults]
//! format = "text"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const TOML_CONFIG_FILE: &str = "repoinsight.toml";
pub const JSON_CONFIG_FILE: &str = ".repoinsightrc.json";

/// Largest rayon pool the engine will build
pub const MAX_WORKERS: usize = 64;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub defaults: CliDefaults,
}

impl EngineConfig {
    /// Fix up values the engine cannot honour, warning about each
    pub fn sanitize(mut self) -> Self {
        let weights = &mut self.scoring.weights;
        if !weights.is_valid() {
            let before = weights.clone();
            weights.normalize();
            warn!(
                "Score weights {:.3}/{:.3}/{:.3} do not sum to 1.0, using {:.3}/{:.3}/{:.3}",
                before.quality,
                before.principles,
                before.collaboration,
                weights.quality,
                weights.principles,
                weights.collaboration
            );
        }

        if let Some(workers) = self.execution.workers {
            if workers == 0 || workers > MAX_WORKERS {
                warn!(
                    "Ignoring workers = {} (must be 1-{})",
                    workers, MAX_WORKERS
                );
                self.execution.workers = None;
            }
        }

        self
    }
}

/// Scoring configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
}

/// Weights of the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight for the quality score (default: 0.40)
    #[serde(default = "default_quality_weight")]
    pub quality: f64,

    /// Weight for the principle score (default: 0.35)
    #[serde(default = "default_principles_weight")]
    pub principles: f64,

    /// Weight for the collaboration score (default: 0.25)
    #[serde(default = "default_collaboration_weight")]
    pub collaboration: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            quality: default_quality_weight(),
            principles: default_principles_weight(),
            collaboration: default_collaboration_weight(),
        }
    }
}

fn default_quality_weight() -> f64 {
    0.40
}
fn default_principles_weight() -> f64 {
    0.35
}
fn default_collaboration_weight() -> f64 {
    0.25
}

impl ScoreWeights {
    /// Validate that weights sum to 1.0 (with tolerance)
    pub fn is_valid(&self) -> bool {
        let sum = self.quality + self.principles + self.collaboration;
        self.quality >= 0.0
            && self.principles >= 0.0
            && self.collaboration >= 0.0
            && (sum - 1.0).abs() < 0.001
    }

    /// Normalize weights to sum to 1.0.
    ///
    /// Negative weights or a non-positive total restore the defaults.
    pub fn normalize(&mut self) {
        let sum = self.quality + self.principles + self.collaboration;
        let negative = self.quality < 0.0 || self.principles < 0.0 || self.collaboration < 0.0;
        if sum > 0.0 && !negative {
            self.quality /= sum;
            self.principles /= sum;
            self.collaboration /= sum;
        } else {
            *self = Self::default();
        }
    }

    /// Same weights as the built-in scoring contract
    pub fn is_default(&self) -> bool {
        let default = Self::default();
        (self.quality - default.quality).abs() < 1e-9
            && (self.principles - default.principles).abs() < 1e-9
            && (self.collaboration - default.collaboration).abs() < 1e-9
    }
}

/// How the pipeline schedules the analyzers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Run the four analyzers concurrently (default: true)
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Dedicated rayon pool size; the global pool when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            workers: None,
        }
    }
}

fn default_parallel() -> bool {
    true
}

/// Default CLI flags that can be set in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,
}

/// Load configuration from a directory
///
/// Tries `repoinsight.toml`, then `.repoinsightrc.json`. Files that fail to
/// load are skipped with a warning; defaults are returned when nothing
/// loads.
pub fn load_config(dir: &Path) -> EngineConfig {
    for name in [TOML_CONFIG_FILE, JSON_CONFIG_FILE] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    EngineConfig::default()
}

/// Load one configuration file, picking the format from its extension
pub fn load_config_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let config: EngineConfig = if is_json {
        serde_json::from_str(&content).context("Invalid JSON config")?
    } else {
        toml::from_str(&content).context("Invalid TOML config")?
    };

    Ok(config.sanitize())
}

/// Commented template written by `repoinsight init`
pub fn config_template() -> &'static str {
    r#"# repoinsight configuration

[scoring.weights]
# Overall score = quality * w1 + principles * w2 + collaboration * w3.
# Weights must sum to 1.0; other totals are normalised.
quality = 0.40
principles = 0.35
collaboration = 0.25

[execution]
# Run the four analyzers concurrently
parallel = true
# Dedicated thread pool size (1-64); omit to use all cores
# workers = 4

[defaults]
# Output format for `repoinsight analyze`: text, json or markdown
format = "text"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.scoring.weights.is_valid());
        assert!(config.execution.parallel);
        assert_eq!(config.execution.workers, None);
        assert_eq!(config.defaults.format, None);
    }

    #[test]
    fn test_weights_validation() {
        let valid = ScoreWeights {
            quality: 0.5,
            principles: 0.3,
            collaboration: 0.2,
        };
        assert!(valid.is_valid());

        let invalid = ScoreWeights {
            quality: 0.5,
            principles: 0.5,
            collaboration: 0.5,
        };
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_weights_normalize() {
        let mut weights = ScoreWeights {
            quality: 2.0,
            principles: 1.0,
            collaboration: 1.0,
        };
        weights.normalize();
        assert!((weights.quality - 0.5).abs() < 0.001);
        assert!((weights.principles - 0.25).abs() < 0.001);
        assert!((weights.collaboration - 0.25).abs() < 0.001);

        let mut zero = ScoreWeights {
            quality: 0.0,
            principles: 0.0,
            collaboration: 0.0,
        };
        zero.normalize();
        assert_eq!(zero, ScoreWeights::default());
    }

    #[test]
    fn test_weights_is_default() {
        assert!(ScoreWeights::default().is_default());

        let custom = ScoreWeights {
            quality: 0.5,
            principles: 0.3,
            collaboration: 0.2,
        };
        assert!(!custom.is_default());
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(TOML_CONFIG_FILE),
            "[scoring.weights]\nquality = 0.5\nprinciples = 0.3\ncollaboration = 0.2\n\n[execution]\nparallel = false\nworkers = 2\n",
        )
        .unwrap();

        let config = load_config(dir.path());
        assert_eq!(config.scoring.weights.quality, 0.5);
        assert!(!config.execution.parallel);
        assert_eq!(config.execution.workers, Some(2));
    }

    #[test]
    fn test_load_json_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG_FILE),
            r#"{"defaults": {"format": "json"}}"#,
        )
        .unwrap();

        let config = load_config(dir.path());
        assert_eq!(config.defaults.format.as_deref(), Some("json"));
        assert!(config.scoring.weights.is_valid());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOML_CONFIG_FILE), "not = [valid").unwrap();
        assert_eq!(load_config(dir.path()), EngineConfig::default());
    }

    #[test]
    fn test_sanitize_normalizes_and_drops_bad_workers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[scoring.weights]\nquality = 1.0\nprinciples = 1.0\ncollaboration = 2.0\n\n[execution]\nworkers = 500\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert!(config.scoring.weights.is_valid());
        assert!((config.scoring.weights.collaboration - 0.5).abs() < 1e-9);
        assert_eq!(config.execution.workers, None);
    }

    #[test]
    fn test_template_parses() {
        let config: EngineConfig = toml::from_str(config_template()).unwrap();
        assert_eq!(config, EngineConfig {
            defaults: CliDefaults {
                format: Some("text".to_string()),
            },
            ..Default::default()
        });
    }
}
