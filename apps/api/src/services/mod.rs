//! Typed clients for the external HTTP services the tracker delegates to.
//!
//! None of these retry. A failure is reported once and the user retries by hand.

pub mod bookmarks;
pub mod handlers;
pub mod learning;
pub mod resume;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with its own `{"error": ...}` message.
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected status {status}")]
    Status { status: u16 },
}

impl ServiceError {
    /// Converts into the user-facing error, prefixing the failed action.
    pub fn into_app_error(self, service: &'static str, action: &str) -> AppError {
        AppError::upstream(service, format!("{action}: {self}"))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turns a non-success response into a `ServiceError`, preferring the
/// service's own error message when the body carries one.
pub(crate) async fn error_from_response(response: Response) -> ServiceError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) if !parsed.error.trim().is_empty() => ServiceError::Rejected(parsed.error),
        _ => ServiceError::Status { status },
    }
}

/// Shared HTTP client builder for every upstream service.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(join_url("http://x:5001/", "/bookmarks"), "http://x:5001/bookmarks");
        assert_eq!(join_url("http://x:5001", "bookmarks"), "http://x:5001/bookmarks");
    }

    #[test]
    fn test_into_app_error_keeps_service_message() {
        let err = ServiceError::Rejected("Bookmark not found".to_string())
            .into_app_error("Bookmark service", "Failed to delete bookmark");
        assert_eq!(
            err.to_string(),
            "Bookmark service error: Failed to delete bookmark: Bookmark not found"
        );
    }
}
