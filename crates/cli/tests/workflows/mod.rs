//! Workflow integration tests

pub mod config;
pub mod record_setup;
