//! GitLab export data types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Project-scoped issue number (`iid` in GitLab terms).
pub type IssueId = u64;

/// Numeric GitLab user identifier.
pub type UserId = u64;

/// An issue as it appears in the GitLab export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceIssue {
    /// Issue number within the project. Used as the correlation key.
    #[serde(rename = "iid")]
    pub id: IssueId,
    pub title: String,
    /// Markdown description. GitLab writes `null` for empty descriptions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub author_id: UserId,
    #[serde(rename = "issue_assignees", default)]
    pub assignees: Vec<SourceAssignee>,
    #[serde(rename = "notes", default)]
    pub comments: Vec<SourceComment>,
    pub created_at: DateTime<Utc>,
    /// Absent for open issues.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl SourceIssue {
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    pub fn assignee_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.assignees.iter().map(|a| a.user_id)
    }

    /// One-line description used by the `summary` listing.
    pub fn summarize(&self) -> String {
        format!(
            "[{}] [uid={}] [comments={}] {}",
            self.id,
            self.author_id,
            self.comments.len(),
            self.title
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAssignee {
    pub user_id: UserId,
}

/// A note (comment) attached to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceComment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    pub author_id: UserId,
    #[serde(default)]
    pub discussion_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author: SourceAuthor,
}

/// Denormalized author details carried on each note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAuthor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Every user referenced by the issues: authors, assignees and note authors.
pub fn unique_user_ids(issues: &[SourceIssue]) -> BTreeSet<UserId> {
    let mut ids = BTreeSet::new();
    for issue in issues {
        ids.insert(issue.author_id);
        ids.extend(issue.assignee_ids());
        ids.extend(issue.comments.iter().map(|c| c.author_id));
    }
    ids
}
