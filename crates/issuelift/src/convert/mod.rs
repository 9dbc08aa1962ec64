//! Conversion of GitLab records into GitHub issues and comments.
//!
//! - [`mapping`] - GitLab user id <-> GitHub handle lookups
//! - [`rewrite`] - Ordered regex rewriting of issue and note text
//! - [`types`] - The GitHub-side issue and comment payloads
//! - [`issue`] - The converter itself

mod issue;
mod mapping;
mod rewrite;
mod types;

pub use issue::Converter;
pub use mapping::UserMapping;
pub use rewrite::{RewriteRules, TextRewriteRule};
pub use types::{CLOSED_LABEL, PLACEHOLDER_BODY, PLACEHOLDER_TITLE, TargetComment, TargetIssue};
