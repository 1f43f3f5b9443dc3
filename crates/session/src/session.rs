//! Session controller
//!
//! A session is owned by whoever hosts the recorder. It is either idle, or
//! active with an output directory, an idle timeout and the timestamp of the
//! most recent keystroke.

use crate::dedup::DedupTable;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;
use typelog_core::{OutputDir, UnixMillis};

/// Idle gap (milliseconds) that must pass before the next edit triggers a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdleTimeout(NonZeroU64);

impl IdleTimeout {
    /// Timeout offered when nothing else is configured
    pub const DEFAULT_MS: u64 = 1000;

    /// Build a timeout, rejecting zero
    pub fn from_millis(ms: u64) -> Option<Self> {
        NonZeroU64::new(ms).map(Self)
    }

    pub fn as_millis(&self) -> u64 {
        self.0.get()
    }
}

impl Default for IdleTimeout {
    fn default() -> Self {
        Self(NonZeroU64::MIN.saturating_add(Self::DEFAULT_MS - 1))
    }
}

impl std::fmt::Display for IdleTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Timeout text that is not a positive integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selected invalid timeout {0:?}, must be an integer > 0")]
pub struct InvalidTimeout(pub String);

impl FromStr for IdleTimeout {
    type Err = InvalidTimeout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::from_millis)
            .ok_or_else(|| InvalidTimeout(s.to_string()))
    }
}

/// State that only exists while recording
#[derive(Debug, Clone)]
pub(crate) struct Active {
    pub(crate) output_dir: OutputDir,
    pub(crate) idle_timeout: IdleTimeout,
    pub(crate) last_keystroke_ms: UnixMillis,
}

/// A recording session
///
/// While idle the dedup table is always empty and edits are ignored.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) active: Option<Active>,
    pub(crate) dedup: DedupTable,
}

impl Session {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording into `output_dir`
    ///
    /// Does nothing and returns `false` when already recording.
    pub fn enable(&mut self, output_dir: OutputDir, idle_timeout: IdleTimeout, now: UnixMillis) -> bool {
        if self.active.is_some() {
            return false;
        }

        info!(
            "Recording enabled (output: {}, idle timeout: {})",
            output_dir.path().display(),
            idle_timeout
        );

        self.active = Some(Active {
            output_dir,
            idle_timeout,
            last_keystroke_ms: now,
        });
        true
    }

    /// Stop recording and forget every recorded content hash
    pub fn disable(&mut self) {
        if self.active.take().is_some() {
            info!("Recording disabled ({} snapshot names seen)", self.dedup.len());
        }
        self.dedup.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Output directory of the running session
    pub fn output_dir(&self) -> Option<&OutputDir> {
        self.active.as_ref().map(|a| &a.output_dir)
    }

    /// Idle timeout of the running session
    pub fn idle_timeout(&self) -> Option<IdleTimeout> {
        self.active.as_ref().map(|a| a.idle_timeout)
    }

    /// Timestamp of the latest keystroke seen by the running session
    pub fn last_keystroke_ms(&self) -> Option<UnixMillis> {
        self.active.as_ref().map(|a| a.last_keystroke_ms)
    }

    /// Number of snapshot names with a remembered content hash
    pub fn dedup_len(&self) -> usize {
        self.dedup.len()
    }
}
