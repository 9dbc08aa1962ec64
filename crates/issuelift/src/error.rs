//! Error types for the migration pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::github::GitHubError;
use crate::source::IssueId;

/// Errors that can abort a migration run.
///
/// Reading, curation and conversion errors are raised before any request is
/// made. Replay errors carry the identifier that was being processed so a
/// later run can resume from it.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The export file could not be opened or read.
    #[error("failed to read export {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record in the export is not valid JSON for an issue.
    #[error("malformed record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied rewrite pattern is not a valid regular expression.
    #[error("invalid rewrite pattern `{pattern}`: {source}")]
    BadRewritePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two records in the export share the same identifier.
    #[error("duplicate issue identifier #{id} in export")]
    DuplicateIssue { id: IssueId },

    /// An identifier that was asked for is not present in the export.
    #[error("issue #{id} was not found in the export")]
    UnknownIssue { id: IssueId },

    /// Illegal option combination or invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Creating an issue or comment on the target failed.
    #[error("[#{id}] {source}")]
    RemoteCreate {
        id: IssueId,
        #[source]
        source: GitHubError,
    },

    /// The rate limit could not be queried.
    #[error("rate limit query failed: {0}")]
    RateLimitQuery(#[source] GitHubError),
}

impl MigrationError {
    /// Create a configuration error.
    #[inline]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// The identifier the error is attached to, if any.
    pub fn issue_id(&self) -> Option<IssueId> {
        match self {
            Self::DuplicateIssue { id }
            | Self::UnknownIssue { id }
            | Self::RemoteCreate { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_create_message_names_identifier() {
        let err = MigrationError::RemoteCreate {
            id: 42,
            source: GitHubError::UnexpectedStatus {
                status: 422,
                expected: 201,
                body: "Validation Failed".to_string(),
            },
        };
        assert!(err.to_string().starts_with("[#42] "));
        assert_eq!(err.issue_id(), Some(42));
    }

    #[test]
    fn configuration_error_has_no_identifier() {
        let err = MigrationError::configuration("--reverse requires --comments");
        assert_eq!(
            err.to_string(),
            "configuration error: --reverse requires --comments"
        );
        assert_eq!(err.issue_id(), None);
    }
}
