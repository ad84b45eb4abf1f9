//! Init command - write a commented repoinsight.toml

use crate::config::{config_template, TOML_CONFIG_FILE};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }

    let config_path = path.join(TOML_CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists; remove it first to regenerate",
            config_path.display()
        );
    }

    std::fs::write(&config_path, config_template())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("✓ Created {}", config_path.display());

    Ok(())
}
