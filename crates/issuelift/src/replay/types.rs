//! Replay modes, options and per-identifier outcomes.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::convert::{Converter, TargetIssue};
use crate::curate::{ExclusionFilter, curate};
use crate::error::{MigrationError, Result};
use crate::source::{IssueId, SourceIssue};

/// Pause between API calls when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

/// What a replay run creates, and over which identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    /// Create every issue from `start` up to the highest exported identifier,
    /// with placeholders for gaps, each followed by its comments.
    Full { start: IssueId },
    /// Post only comments, onto issues that already exist with the same
    /// numbers. `end` defaults to the highest exported identifier.
    CommentsOnly {
        start: IssueId,
        end: Option<IssueId>,
        reverse: bool,
    },
}

impl ReplayMode {
    /// Build a mode from independent command-line flags.
    ///
    /// Reverse order only makes sense when issues already exist, so it is
    /// rejected unless `comments_only` is set. So is an explicit end in full
    /// mode, which always runs to the last exported issue.
    pub fn from_flags(
        start: IssueId,
        end: Option<IssueId>,
        comments_only: bool,
        reverse: bool,
    ) -> Result<Self> {
        if start == 0 {
            return Err(MigrationError::configuration(
                "start identifier must be at least 1",
            ));
        }
        if !comments_only {
            if reverse {
                return Err(MigrationError::configuration(
                    "--reverse can be specified only in conjunction with --comments",
                ));
            }
            if end.is_some() {
                return Err(MigrationError::configuration(
                    "--end can be specified only in conjunction with --comments",
                ));
            }
            return Ok(Self::Full { start });
        }
        if let Some(end) = end
            && end < start
        {
            return Err(MigrationError::configuration(format!(
                "end identifier {end} is lower than start identifier {start}"
            )));
        }
        Ok(Self::CommentsOnly {
            start,
            end,
            reverse,
        })
    }

    pub fn is_comments_only(&self) -> bool {
        matches!(self, Self::CommentsOnly { .. })
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::CommentsOnly { reverse: true, .. })
    }

    /// Lowest and highest identifier the run covers, given the last exported one.
    ///
    /// Identifiers start at 1, so a directly built mode with `start: 0` covers
    /// the same range as `start: 1`.
    pub fn bounds(&self, max_id: IssueId) -> (IssueId, IssueId) {
        match *self {
            Self::Full { start } => (start.max(1), max_id),
            Self::CommentsOnly { start, end, .. } => (start.max(1), end.unwrap_or(max_id)),
        }
    }

    /// Identifiers in the order the run visits them.
    ///
    /// Empty when the start lies beyond the end.
    pub fn identifiers(&self, max_id: IssueId) -> Box<dyn Iterator<Item = IssueId> + Send> {
        let (low, high) = self.bounds(max_id);
        if self.is_reverse() {
            Box::new((low..=high).rev())
        } else {
            Box::new(low..=high)
        }
    }
}

/// Settings shared by every call in a replay run.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Target repository as `owner/name`.
    pub repo: String,
    /// Pause after each issue (full mode) or each comment (comments-only).
    pub delay: Duration,
}

impl ReplayOptions {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            delay: DEFAULT_DELAY,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Converted issues indexed by identifier, plus the placeholder for gaps.
#[derive(Debug, Clone)]
pub struct ReplayPlan {
    pub issues: BTreeMap<IssueId, TargetIssue>,
    pub placeholder: TargetIssue,
}

impl ReplayPlan {
    /// Curate and convert parsed issues.
    ///
    /// Fails before anything is posted on a duplicate identifier.
    pub fn prepare(
        issues: Vec<SourceIssue>,
        filter: &ExclusionFilter,
        converter: &Converter,
    ) -> Result<Self> {
        let curated = curate(issues, filter);
        Ok(Self {
            issues: converter.convert_all(&curated)?,
            placeholder: converter.placeholder(),
        })
    }

    pub fn max_id(&self) -> Option<IssueId> {
        self.issues.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, id: IssueId) -> Option<&TargetIssue> {
        self.issues.get(&id)
    }

    /// Number of creation calls a run in `mode` makes if nothing fails.
    pub fn request_estimate(&self, mode: ReplayMode) -> usize {
        let Some(max_id) = self.max_id() else {
            return 0;
        };
        mode.identifiers(max_id)
            .map(|id| match (mode.is_comments_only(), self.get(id)) {
                (false, Some(issue)) => 1 + issue.comments.len(),
                (false, None) => 1,
                (true, Some(issue)) => issue.comments.len(),
                (true, None) => 0,
            })
            .sum()
    }
}

/// Outcome for one identifier of a replay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayStep {
    /// Issue created together with its comments.
    Issue {
        id: IssueId,
        title: String,
        comments: usize,
    },
    /// Placeholder created for an identifier missing from the export.
    Placeholder { id: IssueId },
    /// Comments posted onto an existing issue.
    Comments {
        id: IssueId,
        title: String,
        comments: usize,
    },
    /// Comments-only run reached an identifier missing from the export.
    Missing { id: IssueId },
}

impl ReplayStep {
    pub fn id(&self) -> IssueId {
        match self {
            Self::Issue { id, .. }
            | Self::Placeholder { id }
            | Self::Comments { id, .. }
            | Self::Missing { id } => *id,
        }
    }
}

impl fmt::Display for ReplayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue {
                id,
                title,
                comments,
            }
            | Self::Comments {
                id,
                title,
                comments,
            } => write!(f, "[#{id}] {title} ({comments} comments)"),
            Self::Placeholder { id } => write!(f, "[#{id}] PLACEHOLDER"),
            Self::Missing { id } => write!(f, "[#{id}] Issue does not exist (0 comments)"),
        }
    }
}

/// Totals for a completed replay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: Vec<ReplayStep>,
    pub issues_created: usize,
    pub placeholders_created: usize,
    pub comments_created: usize,
    pub requests: usize,
}

impl ReplaySummary {
    /// The per-identifier log lines, in run order.
    pub fn log_lines(&self) -> Vec<String> {
        self.steps.iter().map(ToString::to_string).collect()
    }
}
