//! HTTP-level tests driving the binary against a mock API server.
//!
//! Opt-in via the `http-tests` feature:
//!
//! ```bash
//! cargo test --features http-tests --test http
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use chrono::Utc;
use mockito::Matcher;
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

fn traq(temp: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("traq").expect("binary builds");
    cmd.env_remove("TRAQ_API_URL")
        .env_remove("TRAQ_FORMAT")
        .env("HOME", temp)
        .env("XDG_CACHE_HOME", temp.join("cache"))
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

fn task_json(id: i64, name: &str) -> String {
    format!(
        r#"{{
            "id": {id},
            "name": "{name}",
            "project_id": 1,
            "category_id": 1,
            "priority_id": 2,
            "status_id": 1,
            "currency": "USD",
            "is_active": true,
            "created_at": "2025-03-10T09:00:00Z",
            "updated_at": "2025-03-10T09:00:00Z"
        }}"#
    )
}

fn task_page_json(ids: std::ops::RangeInclusive<i64>, total: usize, limit: usize, page: usize) -> String {
    let items: Vec<String> = ids.map(|id| task_json(id, &format!("Task {}", id))).collect();
    let total_pages = total.div_ceil(limit);
    format!(
        r#"{{
            "items": [{}],
            "total_items": {},
            "total_pages": {},
            "current_page": {},
            "has_next": {},
            "has_prev": {}
        }}"#,
        items.join(","),
        total,
        total_pages,
        page,
        page < total_pages,
        page > 1
    )
}

fn page_query(page: usize, limit: usize) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("limit".into(), limit.to_string()),
    ])
}

// ============================================================================
// Read path
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn task_list_sends_bearer_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let list = server
        .mock("GET", "/tasks/")
        .match_query(page_query(1, 10))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(task_page_json(1..=2, 2, 10, 1))
        .create();

    traq(temp.path(), &config)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1"))
        .stdout(predicate::str::contains("Task 2"));

    list.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn pagination_scenario_last_partial_page() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    // 25 items, limit 10: page 3 carries the trailing 5
    let _list = server
        .mock("GET", "/tasks/")
        .match_query(page_query(3, 10))
        .with_status(200)
        .with_body(task_page_json(21..=25, 25, 10, 3))
        .create();

    let assert = traq(temp.path(), &config)
        .args(["task", "list", "--page", "3"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Task 21"));
    assert!(stdout.contains("Task 25"));
    assert!(!stdout.contains("Task 20"));
    assert!(stdout.contains("page 3/3 of 25 tasks"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn second_run_is_served_from_cache() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let list = server
        .mock("GET", "/tasks/")
        .match_query(page_query(1, 10))
        .with_status(200)
        .with_body(task_page_json(1..=2, 2, 10, 1))
        .expect(1)
        .create();

    let first = traq(temp.path(), &config)
        .args(["task", "list", "--format", "table"])
        .assert()
        .success();
    let second = traq(temp.path(), &config)
        .args(["task", "list", "--format", "table"])
        .assert()
        .success();

    assert_eq!(first.get_output().stdout, second.get_output().stdout);

    // Exactly one request despite two runs
    list.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn no_cache_flag_forces_revalidation() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let list = server
        .mock("GET", "/tasks/")
        .match_query(page_query(1, 10))
        .with_status(200)
        .with_body(task_page_json(1..=2, 2, 10, 1))
        .expect(2)
        .create();

    traq(temp.path(), &config)
        .args(["task", "list", "--no-cache"])
        .assert()
        .success();
    traq(temp.path(), &config)
        .args(["task", "list", "--no-cache"])
        .assert()
        .success();

    list.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn list_all_fetches_every_page_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let p1 = server
        .mock("GET", "/tasks/")
        .match_query(page_query(1, 10))
        .with_status(200)
        .with_body(task_page_json(1..=10, 25, 10, 1))
        .create();
    let p2 = server
        .mock("GET", "/tasks/")
        .match_query(page_query(2, 10))
        .with_status(200)
        .with_body(task_page_json(11..=20, 25, 10, 2))
        .create();
    let p3 = server
        .mock("GET", "/tasks/")
        .match_query(page_query(3, 10))
        .with_status(200)
        .with_body(task_page_json(21..=25, 25, 10, 3))
        .create();

    let assert = traq(temp.path(), &config)
        .args(["task", "list", "--all"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Task 1"));
    assert!(stdout.contains("Task 13"));
    assert!(stdout.contains("Task 25"));

    p1.assert();
    p2.assert();
    p3.assert();
    Ok(())
}

// ============================================================================
// Mutations
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn create_task_posts_payload() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let create = server
        .mock("POST", "/tasks/")
        .match_body(Matcher::PartialJsonString(
            r#"{"name": "Fix login bug", "project_id": 3}"#.to_string(),
        ))
        .with_status(201)
        .with_body(task_json(7, "Fix login bug"))
        .create();

    traq(temp.path(), &config)
        .args(["task", "create", "Fix login bug", "--project", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Task 7 created"))
        .stdout(predicate::str::contains("Fix login bug"));

    create.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn mutation_invalidates_cached_list() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    // Warm the list cache
    let warm = server
        .mock("GET", "/tasks/")
        .match_query(page_query(1, 10))
        .with_status(200)
        .with_body(task_page_json(1..=1, 1, 10, 1))
        .expect(1)
        .create();
    traq(temp.path(), &config)
        .args(["task", "list"])
        .assert()
        .success();
    warm.assert();

    // Mutate the family
    let create = server
        .mock("POST", "/tasks/")
        .with_status(201)
        .with_body(task_json(2, "Task 2"))
        .create();
    traq(temp.path(), &config)
        .args(["task", "create", "Task 2", "--project", "1"])
        .assert()
        .success();
    create.assert();

    // The list view must refetch, not serve the stale page
    let refetch = server
        .mock("GET", "/tasks/")
        .match_query(page_query(1, 10))
        .with_status(200)
        .with_body(task_page_json(1..=2, 2, 10, 1))
        .expect(1)
        .create();
    traq(temp.path(), &config)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2"));
    refetch.assert();

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn update_seeds_detail_cache() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let update = server
        .mock("PUT", "/tasks/7")
        .with_status(200)
        .with_body(task_json(7, "Renamed task"))
        .create();

    traq(temp.path(), &config)
        .args(["task", "update", "7", "--name", "Renamed task"])
        .assert()
        .success();
    update.assert();

    // No GET mock exists: this succeeds only if the detail entry was
    // seeded by the update response.
    traq(temp.path(), &config)
        .args(["task", "get", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed task"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn delete_task_clears_detail_cache() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    // Warm the detail entry
    let get = server
        .mock("GET", "/tasks/7")
        .with_status(200)
        .with_body(task_json(7, "Task 7"))
        .expect_at_least(1)
        .create();
    traq(temp.path(), &config)
        .args(["task", "get", "7"])
        .assert()
        .success();

    let delete = server
        .mock("DELETE", "/tasks/7")
        .with_status(204)
        .create();
    traq(temp.path(), &config)
        .args(["task", "delete", "7", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Task 7 deleted"));
    delete.assert();

    // The seeded entry is gone, so this refetches and now sees a 404
    let gone = server
        .mock("GET", "/tasks/7")
        .with_status(404)
        .with_body(r#"{"detail": "Task 7 not found"}"#)
        .create();
    traq(temp.path(), &config)
        .args(["task", "get", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    get.assert();
    gone.assert();
    Ok(())
}

// ============================================================================
// Timer
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn timer_start_conflict_surfaces_server_detail() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let start = server
        .mock("POST", "/time-entries/start-timer")
        .with_status(409)
        .with_body(r#"{"detail": "A timer is already running for this user"}"#)
        .create();

    traq(temp.path(), &config)
        .args(["timer", "start", "--project", "1", "--task", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already running"));

    start.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn timer_status_without_running_timer() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let active = server
        .mock("GET", "/time-entries/active-timer")
        .with_status(200)
        .with_body("null")
        .create();

    traq(temp.path(), &config)
        .args(["timer", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No timer running"));

    active.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn timer_stop_reports_recorded_hours() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let stop = server
        .mock("POST", "/time-entries/stop-timer")
        .with_status(200)
        .with_body(
            r#"{
                "id": 12,
                "user_id": 1,
                "work_date": "2025-03-10",
                "project_id": 1,
                "task_id": 2,
                "task_name": "Fix login bug",
                "start_time": "09:00",
                "end_time": "11:00",
                "total_hours": 2.0,
                "total_cost": 150.0,
                "created_at": "2025-03-10T09:00:00Z",
                "updated_at": "2025-03-10T11:00:00Z"
            }"#,
        )
        .create();

    traq(temp.path(), &config)
        .args(["timer", "stop"])
        .assert()
        .success()
        .stderr(predicate::str::contains("recorded 2h 00m"))
        .stderr(predicate::str::contains("Fix login bug"));

    stop.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn timer_summary_renders_tracked_hours() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let summary = server
        .mock("GET", "/time-entries/summary")
        .with_status(200)
        .with_body(
            r#"{
                "total_hours_today": 4.5,
                "total_hours_week": 21.0,
                "total_hours_month": 80.0,
                "billable_hours_today": 4.0,
                "billable_hours_week": 18.5,
                "billable_hours_month": 71.0
            }"#,
        )
        .create();

    traq(temp.path(), &config)
        .args(["timer", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4h 30m"))
        .stdout(predicate::str::contains("No timer running"));

    summary.assert();
    Ok(())
}

// ============================================================================
// Calendar
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn calendar_upload_reports_counts() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let file = temp.path().join("events.csv");
    fs::write(&file, "event_name,start_time\nStandup,2025-04-01T09:00:00Z\n")?;

    let upload = server
        .mock("POST", "/calendar/upload")
        .with_status(200)
        .with_body(
            r#"{
                "success": true,
                "total_records": 40,
                "inserted_records": 35,
                "duplicate_records": 3,
                "invalid_records": 2,
                "message": "Processed 40 records"
            }"#,
        )
        .create();

    traq(temp.path(), &config)
        .args(["calendar", "upload"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted:          35"))
        .stdout(predicate::str::contains("Duplicates:        3"));

    upload.assert();
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn server_error_surfaces_detail_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let temp = tempdir()?;
    let config = write_config(temp.path(), &server.url());

    let _get = server
        .mock("GET", "/clients/9")
        .with_status(422)
        .with_body(r#"{"detail": "Client id must be positive"}"#)
        .create();

    traq(temp.path(), &config)
        .args(["client", "get", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client id must be positive"));

    Ok(())
}
