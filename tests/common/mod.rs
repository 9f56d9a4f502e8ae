use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated preferences location for one test
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Preferences file passed to every command via `--config`
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    /// Write a preferences file before running a command
    pub fn write_config(&self, contents: &str) -> Result<()> {
        std::fs::write(self.config_path(), contents)?;
        Ok(())
    }
}
