//! The target tracker seam used by the replay engine.

use async_trait::async_trait;

use crate::convert::{TargetComment, TargetIssue};
use crate::github::{CreatedIssue, GitHubError, RateLimitResource};

/// Creation calls the replay engine makes against the target tracker.
///
/// Implemented by [`crate::github::GitHubClient`]; tests substitute their
/// own implementations or drive the client through a mock transport.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Create an issue in `repo` (`owner/name`).
    async fn create_issue(&self, repo: &str, issue: &TargetIssue)
    -> Result<CreatedIssue, GitHubError>;

    /// Create a comment on issue `number` in `repo`.
    async fn create_comment(
        &self,
        repo: &str,
        number: u64,
        comment: &TargetComment,
    ) -> Result<(), GitHubError>;

    /// Query the core API rate limit.
    async fn rate_limit(&self) -> Result<RateLimitResource, GitHubError>;

    /// Number of requests issued (or rehearsed, in dry-run) so far.
    fn request_count(&self) -> usize;
}
