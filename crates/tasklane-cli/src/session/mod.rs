//! Session storage and client construction.

pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;

use tasklane_core::{ApiUrl, SessionEvent, TokenStore};
use tasklane_http::{ClientConfig, TaskClient};

/// Build a client backed by the session file.
pub fn open_client(api: &str, session_file: Option<&Path>) -> Result<TaskClient> {
    let api = ApiUrl::new(api).context("Invalid API URL")?;
    let store = storage::open_store(session_file)?;

    tracing::debug!(api = %api, path = %store.path().display(), "Opening client");

    TaskClient::new(ClientConfig::new(api), Arc::new(store)).context("Failed to build HTTP client")
}

/// Fail early with a hint when nobody is logged in.
pub fn require_session(client: &TaskClient) -> Result<()> {
    client
        .store()
        .session()
        .context("Failed to read session")?
        .context("No active session. Run 'tasklane auth login' first.")?;
    Ok(())
}

/// Drain pending events and report whether the session was invalidated.
pub fn was_invalidated(events: &mut broadcast::Receiver<SessionEvent>) -> bool {
    let mut invalidated = false;
    while let Ok(event) = events.try_recv() {
        if matches!(event, SessionEvent::Invalidated { .. }) {
            invalidated = true;
        }
    }
    invalidated
}
