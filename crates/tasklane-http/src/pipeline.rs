//! Authenticated request pipeline with transparent session renewal.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

use tasklane_core::error::{ApiError, AuthError, DecodeError};
use tasklane_core::{AccessToken, Error, Result, SessionEvent, TokenKind, TokenStore};

use crate::config::ClientConfig;
use crate::endpoints::{ErrorResponse, REFRESH, RefreshRequest, RefreshResponse};
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, map_reqwest};

/// Buffered session events per subscriber before old ones are dropped.
const EVENT_CAPACITY: usize = 16;

/// Result of a single HTTP attempt that reached the server.
enum Attempt<R> {
    Success(R),
    Failure(ApiError),
}

/// Executes API calls with the stored access token and renews it at most
/// once per call.
///
/// Cheap to clone; clones share the HTTP connection pool, the token store and
/// the event channel.
#[derive(Clone)]
pub struct Pipeline {
    transport: HttpTransport,
    store: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl Pipeline {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            transport: HttpTransport::new(&config)?,
            store,
            events,
        })
    }

    /// The token store this pipeline reads and writes.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Receive [`SessionEvent`]s emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Perform one logical API call, renewing an expired session once.
    pub async fn execute<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        self.execute_with_retry(request, true).await
    }

    /// Perform one logical API call.
    ///
    /// With `allow_retry`, a 401 whose message says the token expired runs the
    /// refresh procedure and reissues `request` once with the new token. That
    /// second attempt has no refresh path of its own. If the refresh fails the
    /// store is cleared, [`SessionEvent::Invalidated`] is emitted and the
    /// refresh error is returned.
    #[instrument(skip(self, request), fields(method = %request.method(), endpoint = request.endpoint()))]
    pub async fn execute_with_retry<R: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        allow_retry: bool,
    ) -> Result<R> {
        let token = if request.is_authenticated() {
            self.bearer_token()?
        } else {
            None
        };

        let failure = match self.attempt(request, token.as_ref()).await? {
            Attempt::Success(payload) => return Ok(payload),
            Attempt::Failure(failure) => failure,
        };

        if !(allow_retry && request.is_authenticated() && failure.is_expired_token()) {
            debug!(status = failure.status, "Request failed");
            return Err(failure.into());
        }

        info!("Access token expired, renewing session");

        let token = match self.refresh_access_token().await {
            Ok(token) => token,
            Err(err) => {
                self.invalidate(&err);
                return Err(err);
            }
        };

        match self.attempt(request, Some(&token)).await? {
            Attempt::Success(payload) => Ok(payload),
            Attempt::Failure(failure) => {
                debug!(status = failure.status, "Retried request failed");
                Err(failure.into())
            }
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Fails without any network call when no refresh token is stored. Any
    /// non-2xx answer is reported as [`AuthError::SessionExpired`]. On success
    /// only the access slot of the store is overwritten.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<AccessToken> {
        let refresh_token = self
            .store
            .refresh_token()?
            .ok_or(AuthError::NoRefreshToken)?;

        let request = ApiRequest::post(REFRESH)
            .json(&RefreshRequest {
                refresh_token: refresh_token.as_str(),
            })?
            .unauthenticated();

        let response = self.transport.send(&request, None).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(status = status.as_u16(), "Refresh token rejected");
            return Err(AuthError::SessionExpired {
                status: Some(status.as_u16()),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(map_reqwest)?;
        let body: RefreshResponse = decode_body(REFRESH, &bytes)?;
        let token = AccessToken::new(body.access_token);

        self.store.set(TokenKind::Access, token.as_str())?;
        let _ = self.events.send(SessionEvent::Renewed);

        debug!("Access token renewed");
        Ok(token)
    }

    /// Drop the stored session and tell subscribers it is gone.
    fn invalidate(&self, reason: &Error) {
        warn!(error = %reason, "Session renewal failed, clearing stored session");

        if let Err(err) = self.store.clear() {
            error!(error = %err, "Failed to clear token store");
        }

        let _ = self.events.send(SessionEvent::Invalidated {
            reason: reason.to_string(),
        });
    }

    /// The access token to attach, if the store holds a complete session.
    fn bearer_token(&self) -> Result<Option<AccessToken>> {
        match self.store.session()? {
            Some(session) => Ok(Some(session.access_token)),
            None => {
                if self.store.access_token()?.is_some() {
                    warn!("Stored session has no refresh token, sending request unauthenticated");
                }
                Ok(None)
            }
        }
    }

    async fn attempt<R: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<Attempt<R>> {
        let response = self.transport.send(request, token).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest)?;

        if status.is_success() {
            decode_body(request.endpoint(), &bytes).map(Attempt::Success)
        } else {
            Ok(Attempt::Failure(ApiError::new(
                status.as_u16(),
                error_message(&bytes),
            )))
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("base_url", self.transport.base_url())
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

/// Decode a success body. An empty body reads as JSON `null`.
fn decode_body<R: DeserializeOwned>(endpoint: &str, bytes: &[u8]) -> Result<R> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|e| DecodeError::new(endpoint, e.to_string()).into())
}

/// Extract `message` from an error body, if the body is JSON carrying one.
fn error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorResponse>(bytes)
        .ok()
        .and_then(|body| body.message)
}
