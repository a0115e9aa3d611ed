//! Integration tests for the DashSync CLI.
//!
//! Commands run as a subprocess with the session file pointed into a temp
//! directory. The end-to-end tests stand up an axum stand-in for the
//! directory service on an ephemeral port.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::{Value, json};
use std::collections::HashMap;
use tempfile::TempDir;
use tokio::net::TcpListener;

const TEST_TOKEN: &str = "QpwL5tke4Pnpja7X4";

fn cli(session_dir: &TempDir, base_url: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.env("DASHSYNC_SESSION_FILE", session_dir.path().join("session.json"))
        .env("DASHSYNC_API_BASE_URL", base_url)
        .env("DASHSYNC_API_KEY", "")
        .env_remove("RUST_LOG")
        .timeout(std::time::Duration::from_secs(10));
    cmd
}

fn offline(session_dir: &TempDir) -> Command {
    cli(session_dir, "http://127.0.0.1:9/api")
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "eve.holt@reqres.in" && body["password"] == "cityslicka" {
        Json(json!({"token": TEST_TOKEN})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "user not found"})),
        )
            .into_response()
    }
}

async fn list_users(Query(query): Query<HashMap<String, String>>) -> Response {
    let page = query.get("page").map_or("1", String::as_str);
    let data = match page {
        "1" => json!([
            {"id": 1, "email": "george.bluth@reqres.in", "first_name": "George", "last_name": "Bluth", "avatar": ""},
            {"id": 2, "email": "janet.weaver@reqres.in", "first_name": "Janet", "last_name": "Weaver", "avatar": ""},
        ]),
        "2" => json!([
            {"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael", "last_name": "Lawson", "avatar": ""},
        ]),
        "3" => json!([]),
        _ => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    Json(json!({"page": page.parse::<u32>().unwrap_or(1), "per_page": 2, "total": 3, "total_pages": 2, "data": data}))
        .into_response()
}

async fn update_user(headers: HeaderMap, Path(_id): Path<u64>, Json(mut body): Json<Value>) -> Response {
    let authorized = headers
        .get("authorization")
        .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}").as_str());
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    body["updatedAt"] = json!("2025-03-27T10:00:00.000Z");
    Json(body).into_response()
}

async fn delete_user() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_directory() -> String {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", put(update_user).delete(delete_user));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("login"))
        .stdout(contains("logout"))
        .stdout(contains("whoami"))
        .stdout(contains("users"));
}

#[test]
fn test_whoami_when_signed_out() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not signed in"));
}

#[test]
fn test_users_list_requires_session() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(contains("not signed in"));
}

#[test]
fn test_users_delete_requires_session() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["users", "delete", "1"])
        .assert()
        .failure()
        .stderr(contains("not signed in"));
}

#[test]
fn test_login_rejects_invalid_email_before_any_request() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["login", "--email", "not-an-email", "--password", "secret"])
        .assert()
        .failure()
        .stderr(contains("Enter a valid email address."));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_login_rejects_blank_password() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", ""])
        .assert()
        .failure()
        .stderr(contains("Password is required."));
}

#[test]
fn test_login_unreachable_service_reports_generic_failure() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", "secret"])
        .assert()
        .failure()
        .stderr(contains("Something went wrong!"));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_logout_without_session() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("No active session."));
}

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("cli")
        .env("DASHSYNC_SESSION_FILE", dir.path().join("session.json"))
        .arg("config")
        .assert()
        .success()
        .stdout(contains("base_url = \"https://reqres.in/api\""));
}

#[test]
fn test_config_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["config", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(contains("yaml"));
}

#[test]
fn test_completion_for_bash() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["completion", "--shell", "bash"])
        .assert()
        .success()
        .stdout(contains("dashsync"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_round_trip_against_directory() {
    let base_url = spawn_directory().await;
    let dir = TempDir::new().unwrap();

    cli(&dir, &base_url)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", "cityslicka"])
        .assert()
        .success()
        .stdout(contains("Login successful!"));

    let session: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("session.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(session["token"], TEST_TOKEN);

    cli(&dir, &base_url)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Signed in as eve.holt@reqres.in"));

    cli(&dir, &base_url)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", "cityslicka"])
        .assert()
        .failure()
        .stderr(contains("already signed in"));

    cli(&dir, &base_url)
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logged out."));

    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_failure_shows_service_message() {
    let base_url = spawn_directory().await;
    let dir = TempDir::new().unwrap();

    cli(&dir, &base_url)
        .args(["login", "--email", "someone@else.com", "--password", "x"])
        .assert()
        .failure()
        .stderr(contains("user not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_users_workflows_against_directory() {
    let base_url = spawn_directory().await;
    let dir = TempDir::new().unwrap();

    cli(&dir, &base_url)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", "cityslicka"])
        .assert()
        .success();

    cli(&dir, &base_url)
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(contains("George Bluth"))
        .stdout(contains("Janet Weaver"))
        .stdout(contains("Page 1/2"))
        .stdout(contains("Letters: GJ"));

    cli(&dir, &base_url)
        .args(["users", "list", "--letter", "J"])
        .assert()
        .success()
        .stdout(contains("Janet Weaver").and(contains("George Bluth").not()));

    cli(&dir, &base_url)
        .args(["users", "list", "--page", "2", "--search", "LAWSON"])
        .assert()
        .success()
        .stdout(contains("Michael Lawson"))
        .stdout(contains("Page 2/2"));

    cli(&dir, &base_url)
        .args(["users", "update", "2", "--first-name", "Jane"])
        .assert()
        .success()
        .stdout(contains("User updated successfully!"))
        .stdout(contains("Jane Weaver"));

    cli(&dir, &base_url)
        .args(["users", "delete", "1"])
        .assert()
        .success()
        .stdout(contains("User deleted successfully!"));

    cli(&dir, &base_url)
        .args(["users", "delete", "42"])
        .assert()
        .failure()
        .stderr(contains("user 42 is not on page 1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_users_pages_past_the_end_are_rejected() {
    let base_url = spawn_directory().await;
    let dir = TempDir::new().unwrap();

    cli(&dir, &base_url)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", "cityslicka"])
        .assert()
        .success();

    cli(&dir, &base_url)
        .args(["users", "list", "--page", "3"])
        .assert()
        .failure()
        .stdout(contains("Page 2/2").not())
        .stderr(contains("page 3 is out of range; the directory has 2 page(s)"));

    cli(&dir, &base_url)
        .args(["users", "update", "7", "--first-name", "Mike", "--page", "3"])
        .assert()
        .failure()
        .stderr(contains("page 3 is out of range"));
}

#[test]
fn test_users_list_rejects_page_zero() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["users", "list", "--page", "0"])
        .assert()
        .failure()
        .stderr(contains("--page"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_users_list_failed_page_reports_fetch_error() {
    let base_url = spawn_directory().await;
    let dir = TempDir::new().unwrap();

    cli(&dir, &base_url)
        .args(["login", "--email", "eve.holt@reqres.in", "--password", "cityslicka"])
        .assert()
        .success();

    cli(&dir, &base_url)
        .args(["users", "list", "--page", "5"])
        .assert()
        .failure()
        .stderr(contains("Failed to fetch users. Please try again."));
}
