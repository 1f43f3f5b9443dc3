//! Recording session state and the change recorder
//!
//! This crate provides:
//! - The session controller (enable/disable, idle timeout, output directory)
//! - Per-session snapshot deduplication
//! - The change recorder invoked on every edit
//! - Setup validation and the enable/disable toggle
//! - Project root guessing

mod dedup;
pub mod project;
pub mod recorder;
pub mod session;
pub mod setup;

// Re-exports
pub use project::{Module, Project};
pub use recorder::{Edit, FileKind, FileState, RecordOutcome};
pub use session::{IdleTimeout, InvalidTimeout, Session};
pub use setup::{
    action_label, default_session_dir, prepare, toggle, SessionConfig, SetupError, SetupRequest,
    ToggleOutcome,
};
