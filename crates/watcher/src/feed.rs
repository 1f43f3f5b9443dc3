//! Turn watch events into session edits
//!
//! The session wants the text a file had *before* each edit, but a watch
//! event only arrives after the write. The feed keeps the last text it saw
//! for every target file and hands that to the session, then remembers the
//! text now on disk for the next event. Files that already exist when the
//! feed is built are read up front; a file first seen later starts empty.

use crate::ignore::{is_ignored_dir_name, IgnoreRules};
use crate::inspect::{inspect, Inspected};
use crate::{EventKind, WatchEvent};
use ahash::AHashMap;
use std::path::PathBuf;
use tracing::{debug, trace};
use typelog_session::{Edit, FileKind, RecordOutcome, Session};

/// Filters watch events and feeds the survivors to a session
///
/// Each surviving event counts as one keystroke.
pub struct EditFeed {
    extension: String,
    ignore: IgnoreRules,
    texts: AHashMap<PathBuf, String>,
}

impl EditFeed {
    /// Create a feed for files with `extension` under the ignore rules' root
    ///
    /// Reads every matching file under the root so the first edit to it
    /// after a pause snapshots its original content.
    pub fn new(extension: impl Into<String>, ignore: IgnoreRules) -> Self {
        let mut feed = Self {
            extension: extension.into(),
            ignore,
            texts: AHashMap::new(),
        };
        feed.read_existing();
        feed
    }

    fn read_existing(&mut self) {
        let walker = ::ignore::WalkBuilder::new(self.ignore.root())
            .standard_filters(false)
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir_name(entry.file_name()))
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) || self.ignore.should_ignore(path) {
                continue;
            }
            let inspected = inspect(path, &self.extension);
            if worth_keeping(&inspected) {
                self.texts.insert(path.to_path_buf(), inspected.text);
            }
        }

        debug!(
            "Read {} existing *.{} files under {}",
            self.texts.len(),
            self.extension,
            self.ignore.root().display()
        );
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Number of files whose last text is remembered
    pub fn tracked_files(&self) -> usize {
        self.texts.len()
    }

    /// Handle one event; `None` when the event was filtered out before reaching the session
    pub fn handle(&mut self, session: &mut Session, event: &WatchEvent, now: u64) -> Option<RecordOutcome> {
        if event.kind == EventKind::Delete {
            self.texts.remove(&event.path);
            return None;
        }
        if self.ignore.should_ignore(&event.path) {
            trace!("Ignoring {}", event.path.display());
            return None;
        }

        // Short-lived temp files and the old side of a rename
        let Ok(metadata) = std::fs::metadata(&event.path) else {
            trace!("Gone before handling: {}", event.path.display());
            self.texts.remove(&event.path);
            return None;
        };
        if metadata.is_dir() {
            return None;
        }

        let inspected = inspect(&event.path, &self.extension);
        let before = self.texts.get(&event.path).map(String::as_str).unwrap_or("");
        let outcome = session.on_edit(&Edit {
            file: &event.path,
            state: inspected.state,
            text: before,
            now,
        });

        if worth_keeping(&inspected) {
            self.texts.insert(event.path.clone(), inspected.text);
        } else {
            self.texts.remove(&event.path);
        }
        Some(outcome)
    }
}

fn worth_keeping(inspected: &Inspected) -> bool {
    let state = &inspected.state;
    state.kind == FileKind::Target && state.physical && state.valid && !state.binary
}
