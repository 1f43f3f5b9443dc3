//! Project root guessing
//!
//! A project is a name, an optional base path, and a list of modules that
//! each own some content roots. The project directory is the directory of the
//! "main" module when one can be picked, otherwise the base path.

use std::path::{Path, PathBuf};

/// A module and its content roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub content_roots: Vec<PathBuf>,
}

impl Module {
    pub fn new(name: impl Into<String>, content_roots: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            content_roots,
        }
    }

    /// Pick the module's directory
    ///
    /// Only content roots that are directories on disk count. Prefers the one
    /// named after the module, then the first.
    pub fn guess_dir(&self) -> Option<&Path> {
        let dirs: Vec<&Path> = self
            .content_roots
            .iter()
            .map(PathBuf::as_path)
            .filter(|root| root.is_dir())
            .collect();

        dirs.iter()
            .find(|root| root.file_name().is_some_and(|n| n == self.name.as_str()))
            .or_else(|| dirs.first())
            .copied()
    }
}

/// A project as seen by the setup step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// Placeholder project with no files of its own
    pub is_default: bool,
    pub base_path: Option<PathBuf>,
    pub modules: Vec<Module>,
}

impl Project {
    /// A single-module project rooted at `dir`
    pub fn from_dir(dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name: name.clone(),
            is_default: false,
            base_path: Some(dir.to_path_buf()),
            modules: vec![Module::new(name, vec![dir.to_path_buf()])],
        }
    }

    /// Guess the project's root directory
    pub fn guess_project_dir(&self) -> Option<PathBuf> {
        if self.is_default {
            return None;
        }

        let module = if self.modules.len() == 1 {
            self.modules.first()
        } else {
            self.modules.iter().find(|m| m.name == self.name)
        };

        if let Some(dir) = module.and_then(Module::guess_dir) {
            return Some(dir.to_path_buf());
        }

        self.base_path.as_ref().filter(|p| p.exists()).cloned()
    }
}
