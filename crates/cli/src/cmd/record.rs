//! Record snapshots of a project while it is being edited

use crate::system_config;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use typelog_core::now_unix_ms;
use typelog_core::store::resolve_path;
use typelog_session::{
    action_label, default_session_dir, toggle, Project, RecordOutcome, Session, SetupRequest,
    ToggleOutcome,
};
use typelog_watcher::{EditFeed, EditWatcher, IgnoreRules};

/// Watch events buffered between the watcher thread and the session
const EVENT_BUFFER: usize = 1024;

/// Options for `typelog record`
#[derive(Debug, Clone, Default)]
pub struct RecordArgs {
    pub project: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub timeout: Option<String>,
    pub extension: Option<String>,
    pub stop_after_ms: Option<u64>,
}

/// Counters shown when recording stops
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordStats {
    pub edits: usize,
    pub snapshots: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RecordStats {
    pub fn observe(&mut self, outcome: &RecordOutcome) {
        self.edits += 1;
        match outcome {
            RecordOutcome::Written(_) => self.snapshots += 1,
            RecordOutcome::Unchanged { .. } => self.unchanged += 1,
            RecordOutcome::WriteFailed { .. } => self.failed += 1,
            RecordOutcome::Disabled | RecordOutcome::StillTyping | RecordOutcome::NotQualifying => {}
        }
    }
}

pub async fn run(args: RecordArgs) -> Result<()> {
    let config = system_config::load()?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let project_dir = resolve_path(args.project.as_deref().unwrap_or(cwd.as_path()), &cwd);
    let project_root = Project::from_dir(&project_dir).guess_project_dir();
    debug!("Project root: {:?}", project_root);

    let target_dir = args.output.clone().unwrap_or_else(|| {
        default_session_dir(
            project_root.as_deref().unwrap_or(&project_dir),
            chrono::Utc::now(),
        )
    });
    let timeout = args
        .timeout
        .clone()
        .unwrap_or_else(|| config.recorder.idle_timeout_ms.to_string());
    let extension = args
        .extension
        .clone()
        .unwrap_or_else(|| config.recorder.extension.clone());

    let request = SetupRequest {
        project_root: project_root.clone(),
        target_dir,
        timeout,
    };

    let mut session = Session::new();
    let outcome = toggle(&mut session, || Some(request), &cwd, now_unix_ms())
        .context("Cannot enable recording")?;
    let ToggleOutcome::Enabled(output_dir) = outcome else {
        anyhow::bail!("Recording was not enabled");
    };
    let root = project_root.context("Cannot get project root directory")?;

    let rules = IgnoreRules::load(&root, config.ignore.clone())?;
    debug!("Loaded {} ignore sources", rules.active_sources());
    let mut feed = EditFeed::new(extension, rules);
    debug!("Tracking {} files", feed.tracked_files());
    let (watcher, mut events) = EditWatcher::start(&root, EVENT_BUFFER)?;

    println!("{} {}", "●".red(), action_label(session.is_enabled()).bold());
    println!("  {}: {}", "Project".dimmed(), watcher.root().display());
    println!("  {}: {}", "Snapshots".dimmed(), output_dir.display());
    println!(
        "  {}: {} {}",
        "Idle timeout".dimmed(),
        session.idle_timeout().map(|t| t.to_string()).unwrap_or_default(),
        format!("(*.{} files)", feed.extension()).dimmed()
    );
    println!("{}", "Press Ctrl-C to stop".dimmed());

    let stop_after = async {
        match args.stop_after_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(stop_after);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut stats = RecordStats::default();
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    info!("Watcher closed");
                    break;
                };
                if let Some(outcome) = feed.handle(&mut session, &event, now_unix_ms()) {
                    if let RecordOutcome::Written(path) = &outcome {
                        let name = path.file_name().unwrap_or_default().to_string_lossy();
                        println!("  {} {}", "✓".green(), name);
                    }
                    stats.observe(&outcome);
                }
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
            _ = &mut stop_after => {
                info!("Stop deadline reached");
                break;
            }
        }
    }

    drop(watcher);
    let snapshot_dir = session.output_dir().map(|dir| dir.path().to_path_buf());
    toggle(&mut session, || None, &cwd, now_unix_ms())?;

    println!(
        "{} {} ({} edits, {} snapshots, {} unchanged, {} failed)",
        "■".dimmed(),
        "Recording stopped".bold(),
        stats.edits,
        stats.snapshots,
        stats.unchanged,
        stats.failed
    );
    if let Some(dir) = snapshot_dir.filter(|_| stats.snapshots > 0) {
        println!("  {}: {}", "Snapshots in".dimmed(), dir.display());
    }
    Ok(())
}
