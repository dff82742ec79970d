//
//  storedesk
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Low-level helpers used by [`Config`](super::Config) to read and write the
//! TOML file. Writes go to a sibling temporary file first and are renamed into
//! place, so a crash never leaves a half-written config behind.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads a configuration file, returning `None` when it does not exist.
///
/// # Errors
///
/// Any I/O failure other than "not found".
pub fn read_config_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Writes a configuration file, creating parent directories as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let staging = path.with_extension("toml.tmp");
    std::fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_config_file(&dir.path().join("nope.toml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_write_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/config.toml");

        write_config_file(&path, "a = 1\n").unwrap();
        write_config_file(&path, "a = 2\n").unwrap();

        assert_eq!(read_config_file(&path).unwrap().as_deref(), Some("a = 2\n"));
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
