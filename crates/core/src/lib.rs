//! Typelog Core - hashing and snapshot storage primitives
//!
//! This crate provides the foundational layer shared by the recorder and the CLI:
//! - BLAKE3 content hashing
//! - Snapshot file naming and atomic writes
//! - Output directory handling and path containment checks
//! - Clock helpers

pub mod hash;
pub mod store;
pub mod time;

// Re-export main types for convenience
pub use hash::{hash_bytes, hash_text, ContentHash};
pub use store::{snapshot_file_name, OutputDir, StoreError};
pub use time::{now_unix_ms, session_stamp};

/// Unix timestamp in milliseconds
pub type UnixMillis = u64;
