//! GitLab export reader.
//!
//! A GitLab project export stores issues as newline-delimited JSON, one
//! issue per line with its notes nested inside. This module decodes that
//! stream into [`SourceIssue`] records.
//!
//! - [`types`] - Serde models of the exported issue and note records
//! - [`reader`] - Line-by-line decoding of the export file

mod reader;
mod types;

pub use reader::{parse_export, read_export};
pub use types::{
    IssueId, SourceAssignee, SourceAuthor, SourceComment, SourceIssue, UserId, unique_user_ids,
};
