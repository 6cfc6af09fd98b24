#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use tasklane_core::{AccessToken, ApiUrl, MemoryTokenStore, RefreshToken, Session};
use tasklane_http::{ClientConfig, TaskClient};
use wiremock::MockServer;

/// API URL pointing at a mock server.
pub fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(server.uri()).unwrap()
}

pub fn session(access: &str, refresh: &str) -> Session {
    Session::new(AccessToken::new(access), RefreshToken::new(refresh))
}

/// A client whose store already holds the given session.
pub fn logged_in_client(server: &MockServer, access: &str, refresh: &str) -> (TaskClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_session(&session(access, refresh)));
    let client = TaskClient::new(ClientConfig::new(mock_api_url(server)), store.clone()).unwrap();
    (client, store)
}

pub fn anonymous_client(server: &MockServer) -> (TaskClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let client = TaskClient::new(ClientConfig::new(mock_api_url(server)), store.clone()).unwrap();
    (client, store)
}

pub fn task_json(id: &str, title: &str, completed: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "completed": completed,
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z"
    })
}
