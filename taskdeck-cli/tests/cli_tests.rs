//! Integration tests for the `taskdeck` binary.

#[path = "../../taskdeck-shared/tests/common/mod.rs"]
mod common;

use std::{fs, path::Path};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use common::MockBackend;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

fn taskdeck(session: &Path, api: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("taskdeck");
    for var in [
        "TASKDECK_API_URL",
        "TASKDECK_PAGE_SIZE",
        "TASKDECK_SESSION_TTL_HOURS",
        "TASKDECK_SESSION_PATH",
        "TASKDECK_LOG_LEVEL",
        "TASKDECK_LOG_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off")
        .arg("--session-file")
        .arg(session)
        .arg("--api-url")
        .arg(api)
        .timeout(std::time::Duration::from_secs(20));
    cmd
}

fn write_session(path: &Path, role: &str) {
    let user = json!({
        "id": "user-1",
        "name": "Ada",
        "email": "a@b.com",
        "role": role,
    });
    let entries = json!({
        "token": "jwt-stored",
        "user": user.to_string(),
        "expires_at": "2999-01-01T00:00:00Z",
    });
    fs::write(path, entries.to_string()).unwrap();
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("taskdeck");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("signin"))
        .stdout(predicate::str::contains("tasks"))
        .stdout(predicate::str::contains("route"));
}

#[test]
fn test_config_prints_defaults() {
    let mut cmd = cargo_bin_cmd!("taskdeck");
    cmd.args(["config", "--format", "toml"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("page_size = 10"))
        .stdout(predicate::str::contains("http://localhost:5000/api"));
}

#[test]
fn test_config_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("taskdeck.json");
    let mut cmd = cargo_bin_cmd!("taskdeck");
    cmd.args(["config", "--format", "json", "--output"]).arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"session_ttl_hours\": 24"));
}

#[test]
fn test_route_resolution_when_signed_out() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    taskdeck(&session, UNREACHABLE_API)
        .args(["route", "/task/add"])
        .assert()
        .success()
        .stdout("redirect /signin\n");

    taskdeck(&session, UNREACHABLE_API)
        .args(["route", "/"])
        .assert()
        .success()
        .stdout("redirect /dashboard\n");

    taskdeck(&session, UNREACHABLE_API)
        .args(["route", "/dashboard"])
        .assert()
        .success()
        .stdout("render /signin at /dashboard\n");
}

#[test]
fn test_route_resolution_with_stored_session() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "user");

    taskdeck(&session, UNREACHABLE_API)
        .args(["route", "/signin"])
        .assert()
        .success()
        .stdout("redirect /dashboard\n");

    taskdeck(&session, UNREACHABLE_API)
        .args(["route", "/task/edit/42"])
        .assert()
        .success()
        .stdout("render /task/edit/42\n");
}

#[test]
fn test_whoami() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    taskdeck(&session, UNREACHABLE_API)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));

    write_session(&session, "admin");
    taskdeck(&session, UNREACHABLE_API)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada <a@b.com>"))
        .stdout(predicate::str::contains("role: admin"));
}

#[test]
fn test_expired_session_is_discarded() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "user");
    let stale = fs::read_to_string(&session)
        .unwrap()
        .replace("2999-01-01", "2000-01-01");
    fs::write(&session, stale).unwrap();

    taskdeck(&session, UNREACHABLE_API)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
    assert!(!session.exists());
}

#[test]
fn test_add_requires_session() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    taskdeck(&session, UNREACHABLE_API)
        .args(["tasks", "add", "--title", "x", "--description", "y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

#[test]
fn test_empty_title_fails_validation_before_network() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "user");

    taskdeck(&session, UNREACHABLE_API)
        .args(["tasks", "add", "--description", "something"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"));
}

#[test]
fn test_non_admin_delete_is_refused_locally() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "user");

    taskdeck(&session, UNREACHABLE_API)
        .args(["tasks", "delete", "task-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Access denied: Only administrators can delete tasks.",
        ));
}

#[test]
fn test_empty_task_id_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "admin");

    for command in ["show", "edit", "delete"] {
        taskdeck(&session, UNREACHABLE_API)
            .args(["tasks", command, ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("task id must not be empty"));
    }
}

#[test]
fn test_task_id_with_slash_passes_the_guard() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, "user");

    taskdeck(&session, UNREACHABLE_API)
        .args(["tasks", "show", "a/b?c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load task"))
        .stderr(predicate::str::contains("already signed in").not());
}

#[test]
fn test_invalid_status_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    taskdeck(&session, UNREACHABLE_API)
        .args(["tasks", "add", "--title", "x", "--status", "archived"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected one of: Pending, Completed"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_session_against_backend() {
    let backend = MockBackend::start().await;
    backend.add_account("Root", "root@b.com", "hunter22", "admin");
    backend.seed_tasks(12);
    let api = backend.base_url.clone();

    tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let session = dir.path().join("session.json");

        taskdeck(&session, &api)
            .args(["signin", "--email", "root@b.com", "--password", "wrong"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid credentials"));

        taskdeck(&session, &api)
            .args(["signin", "--email", "root@b.com", "--password", "hunter22"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed in successfully!"))
            .stdout(predicate::str::contains("(admin)"));
        assert!(session.exists());

        taskdeck(&session, &api)
            .args(["signin", "--email", "root@b.com", "--password", "hunter22"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already signed in"));

        taskdeck(&session, &api)
            .args(["tasks", "list", "--limit", "5", "--page", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Total: 12 | On this page: 2 | Pages: 3"))
            .stdout(predicate::str::contains("Page 3 of 3"));

        taskdeck(&session, &api)
            .args(["tasks", "add", "--title", "Ship it", "--description", "v1.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Task Added Successfully!"));

        taskdeck(&session, &api)
            .args(["tasks", "edit", "task-3", "--status", "completed"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Task Updated Successfully!"));

        taskdeck(&session, &api)
            .args(["tasks", "show", "task-3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[Completed]"));

        taskdeck(&session, &api)
            .args(["tasks", "delete", "task-3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Task deleted successfully!"));

        taskdeck(&session, &api)
            .arg("signout")
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged out successfully!"));
        assert!(!session.exists());
    })
    .await
    .unwrap();
}
