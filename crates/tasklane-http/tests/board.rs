//! Optimistic task board tests.

mod common;

use common::*;
use serde_json::json;
use tasklane_core::{TaskFilter, TaskId};
use tasklane_http::TaskBoard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t2", "Walk dog", true),
            task_json("t1", "Buy milk", false)
        ])))
        .mount(server)
        .await;
}

fn id(s: &str) -> TaskId {
    TaskId::new(s).unwrap()
}

#[tokio::test]
async fn test_load_and_filter() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();

    assert_eq!(board.tasks().len(), 2);
    assert_eq!(board.visible(TaskFilter::All).count(), 2);

    let active: Vec<_> = board.visible(TaskFilter::Active).map(|t| t.title.as_str()).collect();
    assert_eq!(active, vec!["Buy milk"]);

    let done: Vec<_> = board.visible(TaskFilter::Completed).map(|t| t.title.as_str()).collect();
    assert_eq!(done, vec!["Walk dog"]);
}

#[tokio::test]
async fn test_create_prepends() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json("t3", "Call mum", false)))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();

    let created = board.create(&client, "Call mum").await.unwrap();
    assert_eq!(created.id, id("t3"));
    assert_eq!(board.tasks()[0].id, id("t3"));
    assert_eq!(board.tasks().len(), 3);
}

#[tokio::test]
async fn test_toggle_reconciles_with_server() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    let mut updated = task_json("t1", "Buy milk", true);
    updated["updatedAt"] = json!("2024-05-01T12:00:00.000Z");

    Mock::given(method("PATCH"))
        .and(path("/tasks/t1/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();

    board.toggle(&client, &id("t1")).await.unwrap();

    let task = board.get(&id("t1")).unwrap();
    assert!(task.completed);
    assert!(task.is_edited());
}

#[tokio::test]
async fn test_toggle_without_body_keeps_tentative_state() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/t2/toggle"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();

    board.toggle(&client, &id("t2")).await.unwrap();
    assert!(!board.get(&id("t2")).unwrap().completed);
}

#[tokio::test]
async fn test_toggle_rolls_back_on_failure() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/t1/toggle"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Task not found"})))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();
    let before = board.tasks().to_vec();

    let err = board.toggle(&client, &id("t1")).await.unwrap_err();

    assert_eq!(err.to_string(), "Task not found");
    assert_eq!(board.tasks(), before.as_slice());
}

#[tokio::test]
async fn test_delete_removes_and_rolls_back_on_failure() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/t1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/t2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();

    board.delete(&client, &id("t1")).await.unwrap();
    assert!(board.get(&id("t1")).is_none());
    assert_eq!(board.tasks().len(), 1);

    let err = board.delete(&client, &id("t2")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(board.get(&id("t2")).is_some());
}

#[tokio::test]
async fn test_rename_replaces_task() {
    let server = MockServer::start().await;
    mount_list(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/t1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_json("t1", "Buy oat milk", false)),
        )
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "A1", "R1");
    let mut board = TaskBoard::new();
    board.load(&client).await.unwrap();

    board.rename(&client, &id("t1"), "Buy oat milk").await.unwrap();
    assert_eq!(board.get(&id("t1")).unwrap().title, "Buy oat milk");
}
