//! `typelog config` against a private config file

use crate::common::TestProject;
use crate::typelog;
use anyhow::Result;
use std::fs;

#[test]
fn test_path_and_create() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    let result = typelog!(project.parent(), "config", "--path")
        .config_file(&config)
        .assert_success()?;
    assert!(result.contains_stdout("typelog.toml"));
    assert!(result.contains_stdout("--create"));
    assert!(!config.exists());

    typelog!(project.parent(), "config", "--path", "--create")
        .config_file(&config)
        .assert_success()?;
    let text = fs::read_to_string(&config)?;
    assert!(text.contains("idle_timeout_ms = 1000"), "{text}");
    Ok(())
}

#[test]
fn test_set_then_get() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    typelog!(project.parent(), "config", "--set", "recorder.extension", "java")
        .config_file(&config)
        .assert_success()?;

    let result = typelog!(project.parent(), "config", "--get", "recorder.extension")
        .config_file(&config)
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "java");

    let result = typelog!(project.parent(), "config", "--get", "recorder.idle_timeout_ms")
        .config_file(&config)
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "1000");
    Ok(())
}

#[test]
fn test_invalid_set_leaves_file_alone() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    typelog!(project.parent(), "config", "--set", "recorder.idle_timeout_ms", "0")
        .config_file(&config)
        .assert_failure()?;
    typelog!(project.parent(), "config", "--get", "no.such.key")
        .config_file(&config)
        .assert_failure()?;
    assert!(!config.exists());
    Ok(())
}

#[test]
fn test_example_and_list() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    let result = typelog!(project.parent(), "config", "--example")
        .config_file(&config)
        .assert_success()?;
    assert!(result.contains_stdout("[recorder]"));
    assert!(result.contains_stdout("[ignore]"));

    let result = typelog!(project.parent(), "config")
        .config_file(&config)
        .assert_success()?;
    assert!(result.contains_stdout("idle_timeout_ms"));
    assert!(result.contains_stdout("\"kt\""));
    Ok(())
}
