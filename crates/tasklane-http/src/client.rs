//! Typed bindings for the task API endpoints.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use tasklane_core::error::InvalidInputError;
use tasklane_core::{
    AccessToken, Credentials, RefreshToken, Registration, Result, Session, SessionEvent, Task,
    TaskId, TokenStore, User,
};

use crate::config::ClientConfig;
use crate::endpoints::{self, LoginResponse, TitleRequest};
use crate::pipeline::Pipeline;
use crate::request::ApiRequest;

/// Client for the task API.
///
/// Every call runs through the shared [`Pipeline`], so authenticated calls
/// pick up the current token from the store and survive one access-token
/// expiry transparently.
#[derive(Debug, Clone)]
pub struct TaskClient {
    pipeline: Pipeline,
}

impl TaskClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        Ok(Self {
            pipeline: Pipeline::new(config, store)?,
        })
    }

    pub fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        self.pipeline.store()
    }

    /// Receive session renewal and invalidation events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.pipeline.subscribe()
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Exchange credentials for a session and store both tokens.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: Credentials) -> Result<Session> {
        info!("Logging in");

        let request = ApiRequest::post(endpoints::LOGIN)
            .json(&credentials)?
            .unauthenticated();
        let response: LoginResponse = self.pipeline.execute(&request).await?;

        let session = Session::new(
            AccessToken::new(response.access_token),
            RefreshToken::new(response.refresh_token),
        );
        self.store().store_session(&session)?;

        debug!("Session stored");
        Ok(session)
    }

    /// Create an account. The server's confirmation is returned as-is.
    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    pub async fn register(&self, registration: Registration) -> Result<serde_json::Value> {
        info!("Registering account");

        let request = ApiRequest::post(endpoints::REGISTER)
            .json(&registration)?
            .unauthenticated();
        self.pipeline.execute(&request).await
    }

    /// Forget the stored session.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.store().clear()
    }

    /// Renew the access token now, without waiting for an expiry response.
    pub async fn refresh(&self) -> Result<AccessToken> {
        self.pipeline.refresh_access_token().await
    }

    /// Profile of the logged-in user.
    pub async fn me(&self) -> Result<User> {
        self.pipeline.execute(&ApiRequest::get(endpoints::ME)).await
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.pipeline.execute(&ApiRequest::get(endpoints::TASKS)).await
    }

    #[instrument(skip(self))]
    pub async fn create_task(&self, title: &str) -> Result<Task> {
        let title = non_blank(title)?;
        let request = ApiRequest::post(endpoints::TASKS).json(&TitleRequest { title })?;
        self.pipeline.execute(&request).await
    }

    /// Flip a task's completion state. Some servers answer without a body.
    #[instrument(skip(self), fields(%id))]
    pub async fn toggle_task(&self, id: &TaskId) -> Result<Option<Task>> {
        self.pipeline
            .execute(&ApiRequest::patch(endpoints::task_toggle(id)))
            .await
    }

    #[instrument(skip(self), fields(%id))]
    pub async fn update_task(&self, id: &TaskId, title: &str) -> Result<Task> {
        let title = non_blank(title)?;
        let request = ApiRequest::patch(endpoints::task(id)).json(&TitleRequest { title })?;
        self.pipeline.execute(&request).await
    }

    #[instrument(skip(self), fields(%id))]
    pub async fn delete_task(&self, id: &TaskId) -> Result<()> {
        // Whatever the server echoes back is not needed.
        let _: serde_json::Value = self
            .pipeline
            .execute(&ApiRequest::delete(endpoints::task(id)))
            .await?;
        Ok(())
    }
}

fn non_blank(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError::BlankTitle.into());
    }
    Ok(trimmed)
}
