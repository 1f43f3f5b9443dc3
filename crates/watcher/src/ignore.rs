//! Ignore rules for the edit feed
//!
//! Paths are checked against, in order:
//! 1. Built-in patterns (VCS metadata, IDE state, build output, editor temp files)
//! 2. The project's .gitignore (optional, enabled by default)
//! 3. Additional gitignore-style patterns from configuration

use anyhow::Result;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Directories never worth recording, wherever they appear
const IGNORED_DIRS: &[&str] = &[
    ".git", ".jj", ".hg", ".svn", ".idea", ".gradle", ".vscode", "build", "out", "target",
    "node_modules",
];

/// Ignore rule manager
pub struct IgnoreRules {
    /// Project root directory
    root: PathBuf,

    /// .gitignore patterns (optional)
    gitignore: Option<Gitignore>,

    /// Patterns from configuration (optional)
    extra: Option<Gitignore>,

    /// Configuration
    config: IgnoreConfig,
}

impl IgnoreRules {
    /// Load ignore rules for a project
    pub fn load(root: &Path, config: IgnoreConfig) -> Result<Self> {
        let mut rules = Self {
            root: root.to_path_buf(),
            gitignore: None,
            extra: None,
            config,
        };

        rules.reload()?;
        Ok(rules)
    }

    /// Rebuild matchers from disk and configuration
    pub fn reload(&mut self) -> Result<()> {
        self.gitignore = None;
        if self.config.use_gitignore {
            let gitignore_path = self.root.join(".gitignore");
            if gitignore_path.exists() {
                let mut builder = GitignoreBuilder::new(&self.root);
                if let Some(e) = builder.add(&gitignore_path) {
                    return Err(e.into());
                }
                self.gitignore = Some(builder.build()?);
            }
        }

        self.extra = None;
        if !self.config.additional_patterns.is_empty() {
            let mut builder = GitignoreBuilder::new(&self.root);
            for pattern in &self.config.additional_patterns {
                builder.add_line(None, pattern)?;
            }
            self.extra = Some(builder.build()?);
        }

        Ok(())
    }

    /// Check if a path (relative to the root, or absolute under it) should be ignored
    pub fn should_ignore(&self, path: &Path) -> bool {
        let rel = match path.strip_prefix(&self.root) {
            Ok(rel) => rel,
            // Outside the project; nothing here to record
            Err(_) if path.is_absolute() => return true,
            Err(_) => path,
        };

        if is_builtin_ignored(rel) {
            return true;
        }

        let is_dir = self.root.join(rel).is_dir();
        [&self.gitignore, &self.extra]
            .into_iter()
            .flatten()
            .any(|matcher| matcher.matched_path_or_any_parents(rel, is_dir).is_ignore())
    }

    /// Get number of active ignore sources
    pub fn active_sources(&self) -> usize {
        1 + usize::from(self.gitignore.is_some()) + usize::from(self.extra.is_some())
    }

    /// Get the project root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Check built-in patterns
///
/// These are always enforced regardless of configuration
fn is_builtin_ignored(rel: &Path) -> bool {
    let in_ignored_dir = rel.components().any(|c| match c {
        Component::Normal(name) => is_ignored_dir_name(name),
        _ => false,
    });
    if in_ignored_dir {
        return true;
    }

    let filename = rel.file_name().and_then(|n| n.to_str()).unwrap_or("");
    is_editor_temp(filename)
}

/// Whether a directory with this name is skipped wherever it appears
pub(crate) fn is_ignored_dir_name(name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| IGNORED_DIRS.contains(&n))
}

/// Editor swap, backup and safe-write temporaries
fn is_editor_temp(filename: &str) -> bool {
    // Vim swap files
    if [".swp", ".swo", ".swn", ".swm"].iter().any(|ext| filename.ends_with(ext)) {
        return true;
    }

    // Backup files (foo.kt~) and Emacs auto-save/lock files
    if filename.ends_with('~')
        || (filename.starts_with('#') && filename.ends_with('#'))
        || filename.starts_with(".#")
    {
        return true;
    }

    // JetBrains safe-write temporaries
    if filename.ends_with("___jb_tmp___") || filename.ends_with("___jb_old___") {
        return true;
    }

    filename == ".DS_Store" || filename.starts_with("._") || filename == "Thumbs.db"
}

/// Ignore configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Use .gitignore patterns (default: true)
    #[serde(default = "default_true")]
    pub use_gitignore: bool,

    /// Additional gitignore-style patterns
    #[serde(default)]
    pub additional_patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_gitignore: true,
            additional_patterns: vec![],
        }
    }
}

fn default_true() -> bool {
    true
}
