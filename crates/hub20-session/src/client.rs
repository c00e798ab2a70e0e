//! reqwest-backed hub20 session.

use crate::error::SessionError;
use crate::session::HttpSession;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP session against a hub20 server.
///
/// The API token is stored using `SecretString` so it never shows up in
/// logs or debug output.
#[derive(Clone, Debug)]
pub struct Session {
    client: Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl Session {
    /// Create an anonymous session with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SessionError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create an anonymous session with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SessionError> {
        let client = Client::builder().timeout(timeout).build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: None,
        })
    }

    /// Authenticate every request with a hub20 API token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_token.is_some()
    }

    /// Health check - returns true if the server answers at all.
    pub async fn health_check(&self) -> bool {
        self.client.get(self.base_url.as_str()).send().await.is_ok()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach common headers, send, and decode.
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Value, SessionError> {
        let request = match &self.api_token {
            Some(token) => {
                request.header(AUTHORIZATION, format!("Token {}", token.expose_secret()))
            }
            None => request,
        };

        let response = request.header(ACCEPT, "application/json").send().await?;
        self.handle_response(path, response).await
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value, SessionError> {
        let status = response.status();

        if !status.is_success() {
            return Err(self.extract_error(path, response).await);
        }

        let body = response.text().await?;
        debug!(
            "Response body: {}",
            body.chars().take(200).collect::<String>()
        );

        // 204 No Content and friends
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(SessionError::from)
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, path: &str, response: reqwest::Response) -> SessionError {
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication failed for {}", path);
                SessionError::Unauthorized
            }
            StatusCode::NOT_FOUND => SessionError::NotFound {
                path: path.to_string(),
            },
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                warn!("Request to {} failed: {} - {}", path, status, message);
                SessionError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl HttpSession for Session {
    #[instrument(skip(self))]
    async fn get(&self, path: &str) -> Result<Value, SessionError> {
        let request = self.client.get(self.url(path));
        self.send(request, path).await
    }

    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: &Value) -> Result<Value, SessionError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, path).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<Value, SessionError> {
        let request = self.client.delete(self.url(path));
        self.send(request, path).await
    }
}
