//! File system edit feed for Typelog
//!
//! This crate turns file system activity under a project root into edit
//! events for a recording session:
//! - Recursive watching via notify
//! - Ignore rules for VCS, IDE and editor temp files
//! - Per-file qualification (type, writability, binary content)

pub mod feed;
pub mod ignore;
pub mod inspect;

pub use feed::EditFeed;
pub use self::ignore::{IgnoreConfig, IgnoreRules};
pub use inspect::{inspect, Inspected};

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Recursive watcher forwarding file events over a channel
///
/// Watching stops when this value is dropped.
pub struct EditWatcher {
    _inner: RecommendedWatcher,
    root: PathBuf,
}

impl EditWatcher {
    /// Start watching `root`; events arrive on the returned receiver
    pub fn start(root: &Path, buffer: usize) -> Result<(Self, mpsc::Receiver<WatchEvent>)> {
        let (tx, rx) = mpsc::channel(buffer);

        let mut inner = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    let Some(kind) = EventKind::from_notify(&event.kind) else {
                        return;
                    };
                    for path in event.paths {
                        // Receiver gone means the session is shutting down
                        if tx.blocking_send(WatchEvent { path, kind }).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warn!("Watch error: {}", e),
            }
        })
        .context("Failed to create file watcher")?;

        inner
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;

        debug!("Watching {}", root.display());

        Ok((
            Self {
                _inner: inner,
                root: root.to_path_buf(),
            },
            rx,
        ))
    }

    /// Get the watched root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// File system event
#[derive(Debug, Clone)]
pub struct WatchEvent {
    /// Path that changed
    pub path: PathBuf,
    /// Type of change
    pub kind: EventKind,
}

/// Type of file system event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// File created
    Create,
    /// File modified
    Modify,
    /// File deleted
    Delete,
    /// File renamed (safe-write editors save this way)
    Rename,
}

impl EventKind {
    /// Map a notify event kind, dropping access and metadata-only events
    pub fn from_notify(kind: &notify::EventKind) -> Option<Self> {
        match kind {
            notify::EventKind::Create(_) => Some(Self::Create),
            notify::EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Rename),
            notify::EventKind::Modify(ModifyKind::Metadata(_)) => None,
            notify::EventKind::Modify(_) => Some(Self::Modify),
            notify::EventKind::Remove(_) => Some(Self::Delete),
            _ => None,
        }
    }
}
