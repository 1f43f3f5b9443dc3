//! Snapshot output directory management
//!
//! Snapshots land flat inside a user-chosen directory:
//! ```text
//! SESSION-2024-01-03-14-30-00/
//!   Main.kt-1704292200000.kt
//!   Main.kt-1704292215311.kt
//!   Util.kt-1704292230100.kt
//! ```
//! Nothing in this directory is ever read back.

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors raised while preparing or writing into the output directory
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("output directory does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("cannot apply file path {}: directory expected", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to write snapshot {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A directory known to exist at the time it was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Open an existing directory as the snapshot target
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Err(StoreError::Missing(path));
        }
        if !path.is_dir() {
            return Err(StoreError::NotADirectory(path));
        }
        Ok(Self { path })
    }

    /// Get the directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot file into this directory, replacing any file of the same name
    pub fn write_snapshot(&self, file_name: &str, text: &str) -> Result<PathBuf, StoreError> {
        let target = self.path.join(file_name);
        atomic_write(&self.path, &target, text.as_bytes()).map_err(|source| StoreError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

/// Build the snapshot file name for a source file
///
/// `Main.kt` stamped at `1704292200000` becomes `Main.kt-1704292200000.kt`.
/// Sources without an extension get no trailing suffix. Returns `None` for
/// paths with no file name component.
pub fn snapshot_file_name(source: &Path, stamp_ms: u64) -> Option<String> {
    let name = source.file_name()?.to_string_lossy();
    match source.extension() {
        Some(ext) => Some(format!("{}-{}.{}", name, stamp_ms, ext.to_string_lossy())),
        None => Some(format!("{}-{}", name, stamp_ms)),
    }
}

/// Atomic write helper
///
/// Writes data to a temporary file in `tmp_dir`, fsyncs it, then renames it
/// to the target path. `tmp_dir` must be on the same filesystem as `target`.
pub fn atomic_write(tmp_dir: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(tmp_dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Resolve a path to an absolute form suitable for containment checks
///
/// Relative paths are joined onto `base`. `.` and `..` are folded lexically,
/// then the deepest existing ancestor is canonicalized so symlinked prefixes
/// compare equal. The path itself does not need to exist.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut folded = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other.as_os_str()),
        }
    }

    let mut existing = folded.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            for part in rest.iter().rev() {
                resolved.push(part);
            }
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return folded,
        }
    }
}

/// Check whether `path` equals `root` or lies underneath it (component-wise)
pub fn is_within(path: &Path, root: &Path, base: &Path) -> bool {
    resolve_path(path, base).starts_with(resolve_path(root, base))
}
