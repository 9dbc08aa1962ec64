//! Conversion of exported issues and notes into GitHub issues and comments.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use super::mapping::UserMapping;
use super::rewrite::{RewriteRules, TextRewriteRule};
use super::types::{CLOSED_LABEL, TargetComment, TargetIssue};
use crate::error::{MigrationError, Result};
use crate::source::{IssueId, SourceComment, SourceIssue};

/// Converts exported records using a fixed user mapping, label set and rule list.
#[derive(Debug, Clone)]
pub struct Converter {
    users: UserMapping,
    labels: Vec<String>,
    rules: RewriteRules,
}

impl Converter {
    /// Build a converter, compiling the rewrite rules up front.
    ///
    /// An invalid pattern fails here, before any issue is converted.
    pub fn new(users: UserMapping, labels: Vec<String>, rules: &[TextRewriteRule]) -> Result<Self> {
        Ok(Self {
            users,
            labels,
            rules: RewriteRules::compile(rules)?,
        })
    }

    pub fn users(&self) -> &UserMapping {
        &self.users
    }

    /// Labels attached to every created issue, placeholders included.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn convert_issue(&self, issue: &SourceIssue) -> TargetIssue {
        let mut labels = self.labels.clone();
        if issue.is_closed() {
            labels.push(CLOSED_LABEL.to_string());
        }

        let assignees = issue
            .assignee_ids()
            .filter_map(|id| self.users.handle_for(id))
            .map(String::from)
            .collect();

        let body = format!(
            "\nISSUE IMPORTED FROM GITLAB\n\
             original id: #{id}\n\
             state: {state}\n\
             created: `{created}`\n\
             closed: {closed}\n\
             comments: {comments}\n\
             original author: {author}\n\n---\n\n{description}",
            id = issue.id,
            state = if issue.is_closed() { "closed" } else { "open" },
            created = format_timestamp(issue.created_at),
            closed = issue
                .closed_at
                .map(|t| format!("`{}`", format_timestamp(t)))
                .unwrap_or_else(|| "n/a".to_string()),
            comments = issue.comments.len(),
            author = self.users.mention(issue.author_id),
            description = self.rules.apply(&issue.description),
        );

        TargetIssue {
            title: issue.title.clone(),
            body,
            assignees,
            labels,
            comments: issue
                .comments
                .iter()
                .map(|c| self.convert_comment(c))
                .collect(),
            placeholder: false,
        }
    }

    pub fn convert_comment(&self, comment: &SourceComment) -> TargetComment {
        let author = match self.users.handle_for(comment.author_id) {
            Some(handle) => format!("@{handle}"),
            None if !comment.author.name.is_empty() => comment.author.name.clone(),
            None => comment.author_id.to_string(),
        };

        TargetComment {
            body: format!(
                "\nCOMMENT IMPORTED FROM GITLAB\ncreated: `{}`\noriginal author: {}\n\n---\n\n{}",
                format_timestamp(comment.created_at),
                author,
                self.rules.apply(&comment.note),
            ),
        }
    }

    pub fn placeholder(&self) -> TargetIssue {
        TargetIssue::placeholder(&self.labels)
    }

    /// Convert curated issues into an identifier-indexed map.
    ///
    /// Duplicate identifiers are a data error: neither record is preferred.
    pub fn convert_all(&self, issues: &[SourceIssue]) -> Result<BTreeMap<IssueId, TargetIssue>> {
        let mut converted = BTreeMap::new();
        for issue in issues {
            if converted.contains_key(&issue.id) {
                return Err(MigrationError::DuplicateIssue { id: issue.id });
            }
            converted.insert(issue.id, self.convert_issue(issue));
        }
        Ok(converted)
    }
}

fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::source::{SourceAssignee, SourceAuthor};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 9, 30, 0).unwrap()
    }

    fn source_issue(id: IssueId, author_id: u64) -> SourceIssue {
        SourceIssue {
            id,
            title: format!("Issue {id}"),
            description: "See /uploads/abc/screen.png".to_string(),
            author_id,
            assignees: vec![
                SourceAssignee { user_id: 10 },
                SourceAssignee { user_id: 99 },
            ],
            comments: vec![SourceComment {
                note: "Fixed in /uploads/abc/fix.patch".to_string(),
                author_id: 77,
                discussion_id: None,
                created_at: created(),
                author: SourceAuthor {
                    name: "Grace Hopper".to_string(),
                },
            }],
            created_at: created(),
            closed_at: None,
        }
    }

    fn converter(rules: &[TextRewriteRule]) -> Converter {
        let users = UserMapping::from_pairs([("alice", 10)]).unwrap();
        Converter::new(users, vec!["gitlab".to_string()], rules).unwrap()
    }

    #[test]
    fn test_open_issue_body_and_metadata() {
        let target = converter(&[]).convert_issue(&source_issue(5, 10));

        assert_eq!(target.title, "Issue 5");
        assert_eq!(
            target.body,
            "\nISSUE IMPORTED FROM GITLAB\noriginal id: #5\nstate: open\n\
             created: `2021-03-01T09:30:00Z`\nclosed: n/a\ncomments: 1\n\
             original author: @alice\n\n---\n\nSee /uploads/abc/screen.png"
        );
        assert_eq!(target.labels, vec!["gitlab"]);
        assert_eq!(target.assignees, vec!["alice"]);
        assert!(!target.is_placeholder());
    }

    #[test]
    fn test_closed_issue_gets_label_without_touching_base_labels() {
        let conv = converter(&[]);
        let mut issue = source_issue(6, 12345);
        issue.closed_at = Some(Utc.with_ymd_and_hms(2021, 4, 2, 8, 0, 0).unwrap());

        let target = conv.convert_issue(&issue);

        assert_eq!(target.labels, vec!["gitlab", "closed"]);
        assert_eq!(conv.labels(), ["gitlab".to_string()]);
        assert!(target.body.contains("state: closed\n"));
        assert!(target.body.contains("closed: `2021-04-02T08:00:00Z`\n"));
        assert!(target.body.contains("original author: 12345\n"));
    }

    #[test]
    fn test_unmapped_assignees_are_dropped() {
        let target = converter(&[]).convert_issue(&source_issue(1, 10));
        assert_eq!(target.assignees, vec!["alice"]);
    }

    #[test]
    fn test_comment_author_prefers_mapping_then_display_name() {
        let conv = converter(&[]);
        let mut comment = source_issue(1, 10).comments.remove(0);

        let body = conv.convert_comment(&comment).body;
        assert!(body.contains("original author: Grace Hopper\n"));

        comment.author_id = 10;
        let body = conv.convert_comment(&comment).body;
        assert!(body.contains("original author: @alice\n"));

        comment.author_id = 78;
        comment.author.name.clear();
        let body = conv.convert_comment(&comment).body;
        assert!(body.contains("original author: 78\n"));
    }

    #[test]
    fn test_rules_apply_to_description_and_notes() {
        let conv = converter(&[TextRewriteRule::new(
            r"/uploads/(\w+)/",
            "https://files.example.com/$1/",
        )]);
        let target = conv.convert_issue(&source_issue(1, 10));

        assert!(target.body.ends_with("See https://files.example.com/abc/screen.png"));
        assert!(target.comments[0]
            .body
            .ends_with("Fixed in https://files.example.com/abc/fix.patch"));
    }

    #[test]
    fn test_bad_pattern_fails_converter_construction() {
        let err = Converter::new(
            UserMapping::default(),
            Vec::new(),
            &[TextRewriteRule::new("(", "")],
        )
        .unwrap_err();
        assert!(matches!(err, MigrationError::BadRewritePattern { .. }));
    }

    #[test]
    fn test_convert_all_rejects_duplicates() {
        let conv = converter(&[]);
        let err = conv
            .convert_all(&[source_issue(1, 10), source_issue(2, 10), source_issue(2, 11)])
            .unwrap_err();
        assert!(matches!(err, MigrationError::DuplicateIssue { id: 2 }));
    }

    #[test]
    fn test_convert_all_indexes_by_identifier() {
        let conv = converter(&[]);
        let map = conv
            .convert_all(&[source_issue(1, 10), source_issue(3, 10)])
            .unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_placeholder_uses_base_labels() {
        let placeholder = converter(&[]).placeholder();
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.labels, vec!["gitlab"]);
    }
}
