//! Configuration module for repoinsight
//!
//! This module handles:
//! - Overall score weights
//! - Analyzer scheduling (parallel or sequential, pool size)
//! - CLI defaults

mod engine_config;

pub use engine_config::{
    config_template, load_config, load_config_file, CliDefaults, EngineConfig, ExecutionConfig,
    ScoreWeights, ScoringConfig, JSON_CONFIG_FILE, MAX_WORKERS, TOML_CONFIG_FILE,
};
