//! Starting and stopping recordings
//!
//! Covers validation of the setup step and a short end-to-end recording.

use crate::common::TestProject;
use crate::typelog;
use anyhow::Result;
use std::fs;
use std::thread;
use std::time::Duration;

#[test]
fn test_record_stops_after_deadline() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    let result = typelog!(
        project.parent(),
        "record",
        "--project",
        "project",
        "--output",
        "snaps",
        "--stop-after",
        "300"
    )
    .config_file(&config)
    .assert_success()?;

    assert!(result.contains_stdout("Typelog [Disable]"));
    assert!(result.contains_stdout("Recording stopped"));
    assert!(result.duration >= Duration::from_millis(300));
    assert!(project.parent().join("snaps").is_dir());
    Ok(())
}

#[test]
fn test_default_output_is_next_to_project() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    typelog!(project.path(), "record", "--stop-after", "100")
        .config_file(&config)
        .assert_success()?;

    let sessions = project.siblings_with_prefix("SESSION-")?;
    assert_eq!(sessions.len(), 1, "{sessions:?}");
    assert!(sessions[0].is_dir());
    Ok(())
}

#[test]
fn test_output_inside_project_is_rejected() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    let result = typelog!(
        project.parent(),
        "record",
        "--project",
        "project",
        "--output",
        "project/snaps",
        "--stop-after",
        "100"
    )
    .config_file(&config)
    .assert_failure()?;

    assert!(result.contains_stderr("do not use project path"), "{}", result.stderr);
    assert!(!project.path().join("snaps").exists());
    Ok(())
}

#[test]
fn test_output_that_is_a_file_is_rejected() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();
    fs::write(project.parent().join("notes.txt"), "not a directory")?;

    let result = typelog!(
        project.parent(),
        "record",
        "--project",
        "project",
        "--output",
        "notes.txt",
        "--stop-after",
        "100"
    )
    .config_file(&config)
    .assert_failure()?;

    assert!(result.contains_stderr("directory expected"), "{}", result.stderr);
    Ok(())
}

#[test]
fn test_invalid_timeouts_are_rejected() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    for timeout in ["0", "-5", "soon"] {
        let result = typelog!(
            project.parent(),
            "record",
            "--project",
            "project",
            "--output",
            "snaps",
            "--timeout",
            timeout,
            "--stop-after",
            "100"
        )
        .config_file(&config)
        .assert_failure()?;

        assert!(result.contains_stderr("invalid timeout"), "{}", result.stderr);
    }
    assert!(!project.parent().join("snaps").exists());
    Ok(())
}

#[test]
fn test_missing_project_is_rejected() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    let result = typelog!(
        project.parent(),
        "record",
        "--project",
        "does-not-exist",
        "--output",
        "snaps",
        "--stop-after",
        "100"
    )
    .config_file(&config)
    .assert_failure()?;

    assert!(result.contains_stderr("cannot get project root directory"), "{}", result.stderr);
    Ok(())
}

#[test]
fn test_configured_timeout_is_used() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    typelog!(project.parent(), "config", "--set", "recorder.idle_timeout_ms", "250")
        .config_file(&config)
        .assert_success()?;

    let result = typelog!(
        project.parent(),
        "record",
        "--project",
        "project",
        "--output",
        "snaps",
        "--stop-after",
        "100"
    )
    .config_file(&config)
    .assert_success()?;

    assert!(result.contains_stdout("250ms"), "{}", result.stdout);
    Ok(())
}

#[test]
fn test_edit_after_pause_is_snapshotted() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.config_file();

    let child = typelog!(
        project.parent(),
        "record",
        "--project",
        "project",
        "--output",
        "snaps",
        "--timeout",
        "100",
        "--stop-after",
        "4000"
    )
    .config_file(&config)
    .spawn()?;

    // Give the watcher time to start, well past the idle timeout
    thread::sleep(Duration::from_millis(1500));
    fs::write(project.path().join("src/Greeter.kt"), "fun greet() = \"hi\"\n")?;

    let output = child.wait_with_output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let snapshots: Vec<String> = fs::read_dir(project.parent().join("snaps"))?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    assert!(
        snapshots
            .iter()
            .any(|name| name.starts_with("Greeter.kt-") && name.ends_with(".kt")),
        "{snapshots:?}"
    );
    Ok(())
}
