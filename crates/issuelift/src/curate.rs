//! Curation of parsed issues: ordering and system-note filtering.

use crate::source::{SourceComment, SourceIssue};

/// Note prefixes GitLab uses for system-generated notes.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &[
    "mentioned in",
    "assigned to",
    "unassigned",
    "changed the description",
    "created branch",
    "changed title",
    "marked the checklist",
    "marked this issue",
];

/// Ordered list of literal prefixes; a note starting with any of them is dropped.
///
/// Matching is case-sensitive and anchored at the start of the note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionFilter {
    prefixes: Vec<String>,
}

impl ExclusionFilter {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A filter that keeps every note.
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn excludes(&self, note: &str) -> bool {
        self.prefixes.iter().any(|p| note.starts_with(p.as_str()))
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().copied())
    }
}

/// Sort issues by identifier, drop excluded notes and order the rest by time.
///
/// Both sorts are stable, so issues sharing an identifier and notes sharing a
/// timestamp keep their relative input order. Duplicate identifiers are left
/// in place; they are rejected when the identifier index is built.
pub fn curate(mut issues: Vec<SourceIssue>, filter: &ExclusionFilter) -> Vec<SourceIssue> {
    issues.sort_by_key(|issue| issue.id);

    for issue in &mut issues {
        let before = issue.comments.len();
        issue.comments.retain(|c| !filter.excludes(&c.note));
        issue.comments.sort_by_key(|c: &SourceComment| c.created_at);

        let dropped = before - issue.comments.len();
        if dropped > 0 {
            tracing::trace!(id = issue.id, dropped, "Excluded system notes");
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::source::SourceAuthor;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 6, 1, 12, minute, 0).unwrap()
    }

    fn comment(note: &str, minute: u32) -> SourceComment {
        SourceComment {
            note: note.to_string(),
            author_id: 1,
            discussion_id: None,
            created_at: at(minute),
            author: SourceAuthor::default(),
        }
    }

    fn issue(id: u64, comments: Vec<SourceComment>) -> SourceIssue {
        SourceIssue {
            id,
            title: format!("Issue {id}"),
            description: String::new(),
            author_id: 1,
            assignees: Vec::new(),
            comments,
            created_at: at(0),
            closed_at: None,
        }
    }

    fn notes(issue: &SourceIssue) -> Vec<&str> {
        issue.comments.iter().map(|c| c.note.as_str()).collect()
    }

    #[test]
    fn test_issues_sorted_by_identifier() {
        let curated = curate(
            vec![issue(9, vec![]), issue(2, vec![]), issue(5, vec![])],
            &ExclusionFilter::default(),
        );
        let ids: Vec<_> = curated.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_excluded_prefixes_are_dropped() {
        let curated = curate(
            vec![issue(
                1,
                vec![
                    comment("mentioned in commit abc123", 1),
                    comment("Looks good to me", 2),
                    comment("assigned to @alice", 3),
                    comment("I was mentioned in the standup", 4),
                ],
            )],
            &ExclusionFilter::default(),
        );
        assert_eq!(
            notes(&curated[0]),
            vec!["Looks good to me", "I was mentioned in the standup"]
        );
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let curated = curate(
            vec![issue(1, vec![comment("Unassigned for now", 1)])],
            &ExclusionFilter::default(),
        );
        assert_eq!(notes(&curated[0]), vec!["Unassigned for now"]);
    }

    #[test]
    fn test_comments_sorted_by_time_with_stable_ties() {
        let curated = curate(
            vec![issue(
                1,
                vec![
                    comment("third", 5),
                    comment("first-a", 1),
                    comment("first-b", 1),
                    comment("second", 3),
                ],
            )],
            &ExclusionFilter::none(),
        );
        assert_eq!(
            notes(&curated[0]),
            vec!["first-a", "first-b", "second", "third"]
        );
    }

    #[test]
    fn test_curation_is_idempotent() {
        let input = vec![
            issue(4, vec![comment("b", 2), comment("changed title", 1)]),
            issue(1, vec![comment("z", 9), comment("a", 0)]),
        ];
        let filter = ExclusionFilter::default();
        let once = curate(input, &filter);
        let twice = curate(once.clone(), &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_identifiers_are_kept_in_input_order() {
        let mut first = issue(3, vec![]);
        first.title = "first".to_string();
        let mut second = issue(3, vec![]);
        second.title = "second".to_string();

        let curated = curate(vec![second, issue(1, vec![]), first], &ExclusionFilter::none());
        let titles: Vec<_> = curated.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Issue 1", "second", "first"]);
    }

    #[test]
    fn test_custom_filter() {
        let filter = ExclusionFilter::new(["bot:"]);
        assert!(filter.excludes("bot: pipeline failed"));
        assert!(!filter.excludes("mentioned in !12"));
        assert_eq!(filter.prefixes(), ["bot:".to_string()]);
    }
}
