//! Offline CLI tests: argument handling, config resolution, and
//! client-side validation that must fail before any network call.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use tempfile::tempdir;

fn future_timestamp() -> String {
    (Utc::now() + chrono::Duration::hours(1)).to_rfc3339()
}

fn write_config(dir: &Path, api_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "api_url: {api_url}\nsession:\n  username: erin\n  access_token: test-token\n  refresh_token: refresh-token\n  expires_at: {}\npreferences:\n  page_size: 10\n",
        future_timestamp()
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn traq(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("traq").expect("binary builds");
    cmd.env_remove("TRAQ_CONFIG")
        .env_remove("TRAQ_API_URL")
        .env_remove("TRAQ_FORMAT")
        .env("HOME", temp)
        .env("XDG_CACHE_HOME", temp.join("cache"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://127.0.0.1:9/api");

    let assert = traq(temp.path())
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("erin"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_without_session_points_at_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not signed in"));

    Ok(())
}

#[test]
fn status_json_reports_signed_in_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://127.0.0.1:9/api");

    traq(temp.path())
        .args(["status", "--format", "json", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signed_in\": true"))
        .stdout(predicate::str::contains("\"username\": \"erin\""));

    Ok(())
}

#[test]
fn list_commands_require_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("traq login"));

    Ok(())
}

#[test]
fn entry_create_rejects_malformed_start_time() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    // Validation fires before config loading or any request
    traq(temp.path())
        .args([
            "entry", "create", "--project", "1", "--task", "2", "--start", "9am",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("--start"));

    Ok(())
}

#[test]
fn entry_create_rejects_end_before_start() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .args([
            "entry", "create", "--project", "1", "--task", "2", "--start", "14:00", "--end",
            "13:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--end must be after --start"));

    Ok(())
}

#[test]
fn timer_start_rejects_non_positive_ids() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .args(["timer", "start", "--project", "0", "--task", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    Ok(())
}

#[test]
fn calendar_upload_rejects_unsupported_extension() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let file = temp.path().join("events.pdf");
    fs::write(&file, b"not a spreadsheet")?;

    traq(temp.path())
        .args(["calendar", "upload"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));

    Ok(())
}

#[test]
fn list_all_conflicts_with_page() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .args(["task", "list", "--all", "--page", "2"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("traq"));

    Ok(())
}

#[test]
fn cache_path_prints_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    traq(temp.path())
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("traq"));

    Ok(())
}
