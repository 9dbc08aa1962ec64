//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a status other than the one expected.
    #[error("status code {status} (expected {expected})")]
    UnexpectedStatus {
        status: u16,
        expected: u16,
        body: String,
    },

    /// Repository is not of the form `owner/name`.
    #[error("invalid repository `{0}`, expected `owner/name`")]
    InvalidRepo(String),

    /// No token was configured.
    #[error("Authentication required")]
    AuthRequired,

    /// The operation needs a real response and the client is in dry-run mode.
    #[error("{0} is not available in dry-run mode")]
    DryRun(&'static str),
}

impl GitHubError {
    /// Whether the API rejected the request because of rate limiting.
    ///
    /// GitHub signals both primary and secondary limits with 403 or 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus {
                status: 403 | 429,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rate_limited() {
        let limited = GitHubError::UnexpectedStatus {
            status: 403,
            expected: 201,
            body: String::new(),
        };
        assert!(limited.is_rate_limited());

        let invalid = GitHubError::UnexpectedStatus {
            status: 422,
            expected: 201,
            body: String::new(),
        };
        assert!(!invalid.is_rate_limited());
        assert!(!GitHubError::AuthRequired.is_rate_limited());
    }

    #[test]
    fn test_unexpected_status_message() {
        let err = GitHubError::UnexpectedStatus {
            status: 404,
            expected: 201,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "status code 404 (expected 201)");
    }
}
