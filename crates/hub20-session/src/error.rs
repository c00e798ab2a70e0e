//! Session errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Unauthorized => Some(401),
            SessionError::NotFound { .. } => Some(404),
            SessionError::Api { status, .. } => Some(*status),
            SessionError::Http(e) => e.status().map(|s| s.as_u16()),
            SessionError::Json(_) => None,
        }
    }
}
