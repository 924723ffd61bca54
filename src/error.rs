//! Error types shared by the store client and the collection layer,
//! including the RFC7807 Problem Details envelope the API speaks.

use serde::{Deserialize, Serialize};

/// Failure surfaced by remote-store operations.
///
/// Every variant carries a human-readable message (already passed through
/// [`try_problem_detail`] where the server sent a problem envelope).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Transport unreachable or timed out. Recoverable; retry via refresh.
    #[error("network error: {0}")]
    Network(String),
    /// The addressed collection or document does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request was rejected by server-side validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The session is no longer valid. Handled by session reconciliation,
    /// not by retrying the request.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Anything else. Surfaced and logged by the shell.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl StoreError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let msg = try_problem_detail(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {body}")
            }
        });
        match status {
            401 | 403 => StoreError::Unauthorized(msg),
            404 => StoreError::NotFound(msg),
            400 | 409 | 422 => StoreError::Validation(msg),
            _ => StoreError::Unknown(msg),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Unauthorized(_))
    }

    /// Message suitable for direct display in a view.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Network(_) => "Could not reach the server. Check your connection and try again.".to_string(),
            StoreError::NotFound(msg)
            | StoreError::Validation(msg)
            | StoreError::Unauthorized(msg)
            | StoreError::Unknown(msg) => msg.clone(),
        }
    }
}

/// RFC7807 Problem Details (application/problem+json).
///
/// The API uses this as the canonical error envelope for `/api/*` so the
/// client can surface meaningful auth and validation errors instead of
/// failing to decode a success response type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// Short human-readable summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference identifying the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Attempt to parse an RFC7807-ish JSON body into a user-facing message.
/// Prefers `detail`, falls back to `title`.
pub fn try_problem_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ProblemDetails>(body).ok()?;
    if let Some(detail) = parsed.detail {
        if !detail.trim().is_empty() {
            return Some(detail);
        }
    }
    if !parsed.title.trim().is_empty() {
        return Some(parsed.title);
    }
    None
}
