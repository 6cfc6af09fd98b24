//! HTTP transport.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument, trace};

use tasklane_core::error::{AuthError, TransportError};
use tasklane_core::{AccessToken, ApiUrl, Error, Result};

use crate::config::ClientConfig;
use crate::request::ApiRequest;

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Sends descriptors to the configured API origin.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    base_url: ApiUrl,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(map_reqwest)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Issue one HTTP call, optionally with a bearer token.
    ///
    /// Only transport failures are errors here; every HTTP status comes back
    /// as a response.
    #[instrument(skip(self, request, token), fields(method = %request.method(), endpoint = request.endpoint()))]
    pub async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response> {
        let url = self.base_url.endpoint_url(request.endpoint());
        debug!(authenticated = token.is_some(), "Sending request");

        let mut builder = self
            .client
            .request(request.method().clone(), &url)
            .headers(Self::headers(request, token)?);

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest)?;
        trace!(status = %response.status(), "Response received");

        Ok(response)
    }

    /// Default JSON content type, then the descriptor's headers, then the
    /// bearer token, each layer overriding the previous.
    fn headers(request: &ApiRequest, token: Option<&AccessToken>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in request.headers() {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| {
                    AuthError::InvalidCredentials(
                        "access token contains characters not allowed in a header".to_string(),
                    )
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}
