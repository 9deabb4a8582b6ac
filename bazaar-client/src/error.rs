//! Client error types.

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the shop service.
///
/// Only [`ClientError::Server`] carries a structured response from the
/// service; every other variant means no usable response was obtained.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API URL: {0}")]
    Url(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API did not return a {0} with an ID")]
    MissingId(&'static str),
}

impl ClientError {
    /// Returns true if the service answered with a structured failure.
    pub fn is_server(&self) -> bool {
        matches!(self, ClientError::Server(_))
    }
}

/// A failure reported by the service in its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

/// RFC 7807 problem document, the service's error body format.
#[derive(Debug, Deserialize)]
struct ProblemDetails {
    title: String,
    #[serde(default)]
    detail: Option<String>,
}

impl ServerError {
    /// Builds a server error from a non-success response body.
    ///
    /// Problem documents supply `title` and `detail`. Any other body becomes
    /// the title verbatim; an empty or non-UTF-8 body falls back to the
    /// status's canonical reason.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        if let Ok(problem) = serde_json::from_slice::<ProblemDetails>(body) {
            return Self {
                status,
                title: problem.title,
                detail: problem.detail,
            };
        }
        let title = match std::str::from_utf8(body) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => status.canonical_reason().unwrap_or("unknown").to_string(),
        };
        Self {
            status,
            title,
            detail: None,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(
                f,
                "Server {} {}: {}",
                self.status.as_u16(),
                self.title,
                detail
            ),
            None => write!(f, "Server {} {}", self.status.as_u16(), self.title),
        }
    }
}

impl std::error::Error for ServerError {}
