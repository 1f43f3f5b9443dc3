//! Configuration management command
//!
//! Provides CLI interface to view and edit the configuration file.

use crate::system_config::{self, SystemConfig, IDLE_TIMEOUT_RANGE};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Every key accepted by `--get` and `--set`
pub const KEYS: &[&str] = &[
    "recorder.idle_timeout_ms",
    "recorder.extension",
    "ignore.use_gitignore",
    "ignore.additional_patterns",
];

/// List all configuration values
pub fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Typelog Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[recorder]".yellow());
    println!(
        "  {} = {} {}",
        "idle_timeout_ms".cyan(),
        config.recorder.idle_timeout_ms,
        format!("({:.1}s)", config.recorder.idle_timeout_ms as f64 / 1000.0).dimmed()
    );
    println!("  {} = {:?}", "extension".cyan(), config.recorder.extension);

    println!("\n{}", "[ignore]".yellow());
    println!("  {} = {}", "use_gitignore".cyan(), config.ignore.use_gitignore);
    println!(
        "  {} = {:?}",
        "additional_patterns".cyan(),
        config.ignore.additional_patterns
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!(
        "  idle_timeout_ms: {}-{}",
        IDLE_TIMEOUT_RANGE.start(),
        IDLE_TIMEOUT_RANGE.end()
    );
    println!("  extension: bare extension without a dot");

    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!("Unknown config key: {}. Available keys: {}", key, KEYS.join(", "))
}

/// Read a single value as it would be printed by `--get`
pub fn get_value(config: &SystemConfig, key: &str) -> Result<String> {
    let value = match key {
        "recorder.idle_timeout_ms" => config.recorder.idle_timeout_ms.to_string(),
        "recorder.extension" => config.recorder.extension.clone(),
        "ignore.use_gitignore" => config.ignore.use_gitignore.to_string(),
        "ignore.additional_patterns" => config.ignore.additional_patterns.join(","),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

/// Apply a single `--set` to `config` and validate the result
pub fn set_value(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "recorder.idle_timeout_ms" => {
            config.recorder.idle_timeout_ms = value
                .parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "recorder.extension" => {
            config.recorder.extension = value.trim_start_matches('.').to_string();
        }
        "ignore.use_gitignore" => {
            config.ignore.use_gitignore = value
                .parse()
                .context("Invalid value: must be 'true' or 'false'")?;
        }
        "ignore.additional_patterns" => {
            config.ignore.additional_patterns = value
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }
        _ => return Err(unknown_key(key)),
    }

    config.validate().context("Invalid configuration value")?;
    Ok(())
}

/// Print a single configuration value
pub fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;
    set_value(&mut config, key, value)?;
    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    println!(
        "{}",
        "Note: running recordings keep their settings until restarted".yellow()
    );

    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}
