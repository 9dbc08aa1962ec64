//! GitHub-side projections of exported issues and notes.

use serde::Serialize;

/// Title used for issues that stand in for deleted GitLab issues.
pub const PLACEHOLDER_TITLE: &str = "[DELETED GITLAB ISSUE]";

/// Body used for issues that stand in for deleted GitLab issues.
pub const PLACEHOLDER_BODY: &str = "This issue was created during the import of gitlab issues \
in order to preserve the ID ordering of gitlab issue IDs. In reality, it represents a deleted \
gitlab issue.";

/// Label appended to issues that were closed on GitLab.
pub const CLOSED_LABEL: &str = "closed";

/// An issue ready to be created on GitHub.
///
/// Serializes to the body of `POST /repos/{owner}/{repo}/issues`. The
/// converted notes travel with the issue but are posted separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetIssue {
    pub title: String,
    pub body: String,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    #[serde(skip)]
    pub comments: Vec<TargetComment>,
    #[serde(skip)]
    pub placeholder: bool,
}

impl TargetIssue {
    /// Stand-in for an identifier that has no record in the export.
    pub fn placeholder(labels: &[String]) -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            body: PLACEHOLDER_BODY.to_string(),
            assignees: Vec::new(),
            labels: labels.to_vec(),
            comments: Vec::new(),
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// A comment ready to be created on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetComment {
    pub body: String,
}
