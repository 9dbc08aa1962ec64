//! Issuelift - replay a GitLab project export as GitHub issues.
//!
//! The pipeline reads the newline-delimited JSON issue export, drops comments
//! whose text starts with an excluded prefix, converts what remains into GitHub
//! issue and comment payloads, and replays them in identifier order so that
//! GitHub assigns the same numbers the issues had on GitLab.
//!
//! # Example
//!
//! ```ignore
//! use issuelift::{Converter, ExclusionFilter, GitHubClient, UserMapping, read_export};
//! use issuelift::replay::{ReplayMode, ReplayOptions, ReplayPlan, replay};
//!
//! let issues = read_export("tree/project/issues.ndjson")?;
//! let converter = Converter::new(UserMapping::default(), vec!["gitlab".into()], &[])?;
//! let plan = ReplayPlan::prepare(issues, &ExclusionFilter::default(), &converter)?;
//!
//! let client = GitHubClient::new(&token)?.with_dry_run(true);
//! let summary = replay(&client, &plan, ReplayMode::Full { start: 1 }, &ReplayOptions::new("owner/repo"), None).await?;
//! ```

pub mod convert;
pub mod curate;
pub mod error;
pub mod github;
pub mod http;
pub mod replay;
pub mod source;
pub mod tracker;

pub use convert::{Converter, TargetComment, TargetIssue, TextRewriteRule, UserMapping};
pub use curate::{DEFAULT_EXCLUDED_PREFIXES, ExclusionFilter, curate};
pub use error::{MigrationError, Result};
pub use github::{GitHubClient, GitHubError};
pub use source::{IssueId, SourceComment, SourceIssue, UserId, parse_export, read_export};
pub use tracker::IssueTracker;
