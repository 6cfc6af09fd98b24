//! Endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

use tasklane_core::TaskId;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login";

pub const REGISTER: &str = "/auth/register";

pub const REFRESH: &str = "/auth/refresh";

pub const ME: &str = "/auth/me";

pub const TASKS: &str = "/tasks";

/// /tasks/{id}
pub fn task(id: &TaskId) -> String {
    format!("{}/{}", TASKS, id)
}

/// /tasks/{id}/toggle
pub fn task_toggle(id: &TaskId) -> String {
    format!("{}/{}/toggle", TASKS, id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response from /auth/login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Request body for /auth/refresh.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from /auth/refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Request body for creating or renaming a task.
#[derive(Debug, Serialize)]
pub struct TitleRequest<'a> {
    pub title: &'a str,
}

/// Error body returned with failure statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
