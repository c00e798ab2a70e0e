//! The session contract API clients are written against.

use crate::error::SessionError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A JSON request/response channel to the hub20 API.
///
/// Paths are absolute API paths (`/api/...`); implementations resolve them
/// against their own base URL. Every call issues one request and yields the
/// parsed response body, or the transport/HTTP failure as a [`SessionError`].
#[async_trait]
pub trait HttpSession: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, SessionError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, SessionError>;

    async fn delete(&self, path: &str) -> Result<Value, SessionError>;
}

#[async_trait]
impl<S: HttpSession + ?Sized> HttpSession for Arc<S> {
    async fn get(&self, path: &str) -> Result<Value, SessionError> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, SessionError> {
        (**self).post(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, SessionError> {
        (**self).delete(path).await
    }
}
