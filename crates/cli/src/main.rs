//! Typelog CLI - typelog command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod cmd;
mod system_config;

/// Typelog - snapshot files while you type
#[derive(Parser)]
#[command(name = "typelog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record snapshots of edited files until interrupted
    Record {
        /// Project directory to watch (default: current directory)
        #[arg(long)]
        project: Option<PathBuf>,

        /// Snapshot directory (default: SESSION-<timestamp> next to the project)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Idle timeout in milliseconds (default: from config, 1000)
        #[arg(short, long, value_name = "MS", allow_hyphen_values = true)]
        timeout: Option<String>,

        /// Extension of the recorded file type (default: from config, "kt")
        #[arg(short, long)]
        extension: Option<String>,

        /// Stop on its own after this many milliseconds
        #[arg(long, value_name = "MS")]
        stop_after: Option<u64>,
    },
    /// View or edit configuration
    Config {
        /// List all values (default)
        #[arg(long)]
        list: bool,

        /// Print one value
        #[arg(long, value_name = "KEY", conflicts_with_all = ["set", "path", "example"])]
        get: Option<String>,

        /// Set one value
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"], conflicts_with_all = ["path", "example"])]
        set: Option<Vec<String>>,

        /// Print the config file location
        #[arg(long, conflicts_with = "example")]
        path: bool,

        /// Create the config file with defaults if missing (with --path)
        #[arg(long, requires = "path")]
        create: bool,

        /// Print an example configuration
        #[arg(long)]
        example: bool,
    },
}

/// Install the global tracing subscriber
///
/// The returned guard must be held until exit so file logs are flushed.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Record {
            project,
            output,
            timeout,
            extension,
            stop_after,
        } => {
            cmd::record::run(cmd::record::RecordArgs {
                project,
                output,
                timeout,
                extension,
                stop_after_ms: stop_after,
            })
            .await
        }
        Commands::Config {
            list: _,
            get,
            set,
            path,
            create,
            example,
        } => {
            if let Some(key) = get {
                cmd::config::run_get(&key)
            } else if let Some([key, value]) = set.as_deref() {
                cmd::config::run_set(key, value)
            } else if path {
                cmd::config::run_path(create)
            } else if example {
                cmd::config::run_example()
            } else {
                cmd::config::run_list()
            }
        }
    }
}
