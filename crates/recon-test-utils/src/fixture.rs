//! Configuration files in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A TOML configuration written to a temporary directory, removed on drop.
pub struct ConfigFixture {
    temp_dir: TempDir,
    path: PathBuf,
}

impl ConfigFixture {
    /// Write `content` to `<tempdir>/main.toml`.
    pub fn new(content: &str) -> Self {
        Self::named("main.toml", content)
    }

    pub fn named(file_name: &str, content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(file_name);
        fs::write(&path, content).unwrap();
        Self {
            temp_dir,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the configuration file.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
