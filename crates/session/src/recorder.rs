//! Change recorder
//!
//! Called once per edit, before the edit is applied. Edits closer together
//! than the idle timeout are treated as continuous typing and only move the
//! keystroke timestamp forward. The first edit after a long enough pause
//! snapshots the file as it stood during the pause, named after the
//! timestamp at which the pause began.

use crate::session::Session;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use typelog_core::{hash_text, snapshot_file_name, UnixMillis};

/// Broad type of the edited file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// The file type being recorded
    Target,
    /// Anything else
    Other,
}

/// What the host knows about the edited file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileState {
    pub kind: FileKind,
    /// Backed by a real file on disk
    pub physical: bool,
    pub read_only: bool,
    pub binary: bool,
    /// Still open and not deleted
    pub valid: bool,
}

impl FileState {
    /// A writable, on-disk text file of the recorded type
    pub fn target() -> Self {
        Self {
            kind: FileKind::Target,
            physical: true,
            read_only: false,
            binary: false,
            valid: true,
        }
    }

    /// A writable, on-disk text file of some other type
    pub fn other() -> Self {
        Self {
            kind: FileKind::Other,
            ..Self::target()
        }
    }

    /// Whether edits to this file may produce snapshots
    pub fn qualifies(&self) -> bool {
        self.kind == FileKind::Target && self.physical && !self.read_only && !self.binary && self.valid
    }
}

/// A single edit event delivered by the host
#[derive(Debug, Clone, Copy)]
pub struct Edit<'a> {
    /// Path of the edited file; its name seeds the snapshot name
    pub file: &'a Path,
    pub state: FileState,
    /// Full text of the file before this edit is applied
    pub text: &'a str,
    pub now: UnixMillis,
}

/// What `Session::on_edit` did with an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Session not recording; nothing changed
    Disabled,
    /// Inside the idle window; keystroke timestamp moved forward
    StillTyping,
    /// Idle gap reached, but the file does not qualify
    NotQualifying,
    /// Idle gap reached, snapshot with identical content already written
    Unchanged { file_name: String },
    /// Snapshot written
    Written(PathBuf),
    /// Snapshot write failed; logged and skipped
    WriteFailed { file_name: String },
}

impl Session {
    /// Feed one edit into the session
    pub fn on_edit(&mut self, edit: &Edit<'_>) -> RecordOutcome {
        let Some(active) = self.active.as_mut() else {
            return RecordOutcome::Disabled;
        };

        let elapsed = edit.now.saturating_sub(active.last_keystroke_ms);
        if elapsed < active.idle_timeout.as_millis() {
            active.last_keystroke_ms = edit.now;
            return RecordOutcome::StillTyping;
        }

        debug!(
            "Idle gap of {}ms ended by edit to {}",
            elapsed,
            edit.file.display()
        );

        let outcome = match snapshot_file_name(edit.file, active.last_keystroke_ms) {
            Some(file_name) if edit.state.qualifies() => {
                let hash = hash_text(edit.text);
                if !self.dedup.is_fresh(&file_name, &hash) {
                    debug!("Snapshot {} unchanged ({})", file_name, hash.short());
                    RecordOutcome::Unchanged { file_name }
                } else {
                    match active.output_dir.write_snapshot(&file_name, edit.text) {
                        Ok(path) => {
                            info!("Wrote snapshot {} ({})", path.display(), hash.short());
                            self.dedup.record(&file_name, hash);
                            RecordOutcome::Written(path)
                        }
                        Err(e) => {
                            warn!("Skipping snapshot: {}", e);
                            RecordOutcome::WriteFailed { file_name }
                        }
                    }
                }
            }
            _ => {
                debug!("Not snapshotting {} ({:?})", edit.file.display(), edit.state);
                RecordOutcome::NotQualifying
            }
        };

        active.last_keystroke_ms = edit.now;
        outcome
    }
}
