//! End-to-end tests for the `tasklane` binary against a mock API.

use std::path::{Path, PathBuf};
use std::process::Output;

use serde_json::json;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn tasklane(server: &MockServer, session_file: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tasklane"))
        .arg("--api")
        .arg(server.uri())
        .arg("--session-file")
        .arg(session_file)
        .args(args)
        .env_remove("TASKLANE_API")
        .env_remove("TASKLANE_SESSION_FILE")
        .env("NO_COLOR", "1")
        .output()
        .await
        .expect("failed to run tasklane")
}

fn session_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

fn write_session(file: &Path, access: &str, refresh: &str) {
    let contents = json!({ "accessToken": access, "refreshToken": refresh });
    std::fs::write(file, contents.to_string()).unwrap();
}

fn task_json(id: &str, title: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "completed": completed,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn login_then_list_as_json() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = session_path(&dir);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "access-1",
            "refreshToken": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "Write report", false),
            task_json("t2", "Buy milk", true),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let login = tasklane(
        &server,
        &file,
        &["auth", "login", "--email", "ada@example.com", "--password", "hunter2"],
    )
    .await;
    assert!(login.status.success(), "stderr: {}", stderr(&login));
    assert!(file.exists());

    let list = tasklane(&server, &file, &["task", "list", "--json"]).await;
    assert!(list.status.success(), "stderr: {}", stderr(&list));

    let tasks: serde_json::Value = serde_json::from_str(stdout(&list).trim()).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 2);
    assert_eq!(tasks[0]["title"], "Write report");
}

#[tokio::test]
async fn list_filter_active_hides_completed() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = session_path(&dir);
    write_session(&file, "access-1", "refresh-1");

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "Write report", false),
            task_json("t2", "Buy milk", true),
        ])))
        .mount(&server)
        .await;

    let output = tasklane(&server, &file, &["task", "list", "--filter", "active", "--json"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let tasks: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], "t1");
}

#[tokio::test]
async fn expired_session_that_cannot_renew_asks_for_login() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = session_path(&dir);
    write_session(&file, "stale", "revoked");

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let output = tasklane(&server, &file, &["task", "list"]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("tasklane auth login"));
    assert!(!file.exists());
}

#[tokio::test]
async fn whoami_without_session_fails_offline() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = session_path(&dir);

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = tasklane(&server, &file, &["auth", "whoami"]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No active session"));
}

#[tokio::test]
async fn logout_removes_session_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let file = session_path(&dir);
    write_session(&file, "access-1", "refresh-1");

    let output = tasklane(&server, &file, &["auth", "logout"]).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!file.exists());
}
