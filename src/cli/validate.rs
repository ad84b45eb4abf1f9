//! Validate command - load a snapshot and report whether it is well formed

use crate::pipeline::{JsonFileSource, SnapshotSource};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let snapshot = JsonFileSource::new(path)
        .load()
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;

    println!(
        "✓ {} is valid: {} ({} files, {} directories, {} commits, {} contributors)",
        path.display(),
        snapshot.full_name(),
        snapshot.total_files(),
        snapshot.total_directories(),
        snapshot.commits.len(),
        snapshot.contributors.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_accepts_minimal_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{"owner": "acme", "name": "shop"}"#).unwrap();
        assert!(run(&path).is_ok());
    }

    #[test]
    fn test_validate_reports_the_problem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{"owner": "acme", "name": "shop", "files": [{"path": "/etc/passwd", "name": "passwd", "type": "file"}]}"#,
        )
        .unwrap();

        let err = run(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid snapshot"));
        assert!(message.contains("/etc/passwd"));
    }
}
