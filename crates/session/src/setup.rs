//! Session setup and the enable/disable toggle
//!
//! Setup turns what the user picked (project, target directory, timeout text)
//! into a validated `SessionConfig`. Nothing about the session changes until
//! every check has passed.

use crate::session::{IdleTimeout, InvalidTimeout, Session};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use typelog_core::store::{is_within, resolve_path};
use typelog_core::{session_stamp, OutputDir, StoreError, UnixMillis};

/// Reasons a session cannot be enabled
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot get project root directory")]
    MissingProjectRoot,

    #[error(transparent)]
    InvalidTimeout(#[from] InvalidTimeout),

    #[error(
        "do not use project path for report directory ({} is inside {})",
        .target.display(),
        .project.display()
    )]
    NestedInProject { target: PathBuf, project: PathBuf },

    #[error("cannot apply file path {}: directory expected", .0.display())]
    NotADirectory(PathBuf),

    #[error("could not create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the user chose in the setup step
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub project_root: Option<PathBuf>,
    pub target_dir: PathBuf,
    /// Raw timeout text, validated here
    pub timeout: String,
}

/// Validated session parameters
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub output_dir: OutputDir,
    pub idle_timeout: IdleTimeout,
}

/// Default output directory: `SESSION-<stamp>` next to the project root
pub fn default_session_dir(project_root: &Path, at: DateTime<Utc>) -> PathBuf {
    let parent = project_root.parent().unwrap_or(project_root);
    parent.join(format!("SESSION-{}", session_stamp(at)))
}

/// Validate a setup request, creating the target directory if needed
///
/// Relative paths are resolved against `cwd`.
pub fn prepare(request: &SetupRequest, cwd: &Path) -> Result<SessionConfig, SetupError> {
    let project_root = request
        .project_root
        .as_deref()
        .ok_or(SetupError::MissingProjectRoot)?;

    let idle_timeout: IdleTimeout = request.timeout.parse()?;

    if is_within(&request.target_dir, project_root, cwd) {
        return Err(SetupError::NestedInProject {
            target: request.target_dir.clone(),
            project: project_root.to_path_buf(),
        });
    }

    let target = resolve_path(&request.target_dir, cwd);
    if target.exists() {
        if !target.is_dir() {
            return Err(SetupError::NotADirectory(target));
        }
        debug!("Reusing existing directory {}", target.display());
    } else {
        std::fs::create_dir_all(&target).map_err(|source| SetupError::CreateDir {
            path: target.clone(),
            source,
        })?;
        debug!("Created directory {}", target.display());
    }

    Ok(SessionConfig {
        output_dir: OutputDir::open(target)?,
        idle_timeout,
    })
}

/// Label of the toggle action for the current state
pub fn action_label(enabled: bool) -> &'static str {
    if enabled {
        "Typelog [Disable]"
    } else {
        "Typelog [Enable]"
    }
}

/// Result of invoking the toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Recording started into this directory
    Enabled(PathBuf),
    Disabled,
    /// The user backed out of the setup step
    Cancelled,
}

/// Flip the session between recording and idle
///
/// When idle, `ask` is called for the setup request; returning `None`
/// cancels. A failed validation leaves the session idle.
pub fn toggle<F>(
    session: &mut Session,
    ask: F,
    cwd: &Path,
    now: UnixMillis,
) -> Result<ToggleOutcome, SetupError>
where
    F: FnOnce() -> Option<SetupRequest>,
{
    if session.is_enabled() {
        session.disable();
        return Ok(ToggleOutcome::Disabled);
    }

    let Some(request) = ask() else {
        info!("Setup cancelled");
        return Ok(ToggleOutcome::Cancelled);
    };

    let config = prepare(&request, cwd)?;
    let dir = config.output_dir.path().to_path_buf();
    session.enable(config.output_dir, config.idle_timeout, now);
    Ok(ToggleOutcome::Enabled(dir))
}
