//! Shared helpers for CLI integration tests

#![allow(dead_code)]

pub mod cli;

use anyhow::Result;
use ft_core::FingerprintRecord;
use journal::{FingerprintStore, SledJournal, StorageConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory with a config file pointing storage inside it
pub struct TestEnv {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("fingertrail.toml");
        let data = dir.path().join("data");
        std::fs::write(
            &config_path,
            format!(
                "[storage]\npath = {:?}\ndatabase = \"test\"\n\n[source]\nmanifest_dir = {:?}\n",
                data.display().to_string(),
                dir.path().join("manifests").display().to_string()
            ),
        )?;
        Ok(Self { dir, config_path })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_arg(&self) -> String {
        self.config_path.display().to_string()
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            path: self.path().join("data"),
            database: "test".to_string(),
        }
    }

    /// Append records directly; the store handle is closed on return
    pub fn seed(&self, records: &[FingerprintRecord]) -> Result<()> {
        let store = FingerprintStore::open(SledJournal::open(&self.storage())?)?;
        for record in records {
            store.append(record)?;
        }
        Ok(())
    }
}
