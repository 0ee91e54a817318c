//! Load failures and error-detail extraction.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::integrations::UnknownIntegration;

/// Errors that can occur while loading integration data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The label has no entry in the registry. No request was sent.
    #[error(transparent)]
    UnknownIntegration(#[from] UnknownIntegration),

    /// The request URL could not be built from the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, protocol, or body read failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Request failed with status {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl LoadError {
    /// Message to surface to the user.
    ///
    /// Backend rejections only ever show the backend's `detail`; when there is
    /// none the message is absent.
    pub fn alert_message(&self) -> Option<String> {
        match self {
            LoadError::Status { detail, .. } => detail.clone(),
            other => Some(other.to_string()),
        }
    }
}

/// Pull the `detail` field out of a JSON error body.
///
/// Strings are returned as-is; any other JSON value (e.g. a list of
/// validation errors) is rendered as compact JSON.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
