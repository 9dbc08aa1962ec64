//! GitHub API client for issue creation.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Rate limit and created-issue response types
//! - [`client`] - Authenticated client implementing [`crate::IssueTracker`]
//!
//! ```ignore
//! use issuelift::github::GitHubClient;
//!
//! let client = GitHubClient::new(&token)?.with_dry_run(true);
//! ```

mod client;
mod error;
mod types;

pub use error::GitHubError;

pub use types::{CreatedIssue, GitHubRateLimitResponse, GitHubRateLimits, RateLimitResource};

pub use client::{GITHUB_API_URL, GITHUB_API_VERSION, GitHubClient, get_rate_limits, validate_repo};
