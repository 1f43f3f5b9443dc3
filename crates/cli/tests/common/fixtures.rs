//! Throwaway project layouts
//!
//! Each fixture owns a temp dir holding `project/` plus room for siblings,
//! so default `SESSION-*` directories land inside the fixture too.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestProject {
    temp_dir: TempDir,
    project: PathBuf,
}

impl TestProject {
    /// Small Kotlin project with one source file
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project = temp_dir.path().join("project");
        fs::create_dir_all(project.join("src"))?;
        fs::write(project.join("src/Main.kt"), "fun main() {}\n")?;
        Ok(Self { temp_dir, project })
    }

    /// The project directory
    pub fn path(&self) -> &Path {
        &self.project
    }

    /// Directory containing the project
    pub fn parent(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Private config file location for commands run against this fixture
    pub fn config_file(&self) -> PathBuf {
        self.temp_dir.path().join("config/typelog.toml")
    }

    /// Sibling directories whose names start with `prefix`
    pub fn siblings_with_prefix(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(self.parent())? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with(prefix) {
                found.push(entry.path());
            }
        }
        Ok(found)
    }
}
