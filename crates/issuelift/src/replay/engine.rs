//! The replay loop.
//!
//! Calls are strictly sequential: one create request at a time, with a fixed
//! pause between them. The first failure ends the run; nothing already
//! created on GitHub is rolled back, and nothing is retried.

use std::time::Duration;

use super::progress::{ProgressCallback, ReplayProgress, emit};
use super::types::{ReplayMode, ReplayOptions, ReplayPlan, ReplayStep, ReplaySummary};
use crate::convert::TargetIssue;
use crate::error::{MigrationError, Result};
use crate::github::GitHubError;
use crate::source::IssueId;
use crate::tracker::IssueTracker;

/// Replay `plan` against `tracker` according to `mode`.
///
/// On failure the returned [`MigrationError::RemoteCreate`] names the
/// identifier being processed; every earlier identifier was fully replayed.
pub async fn replay<T>(
    tracker: &T,
    plan: &ReplayPlan,
    mode: ReplayMode,
    options: &ReplayOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<ReplaySummary>
where
    T: IssueTracker + ?Sized,
{
    let mut summary = ReplaySummary::default();

    let Some(max_id) = plan.max_id() else {
        tracing::warn!("No issues to replay");
        return Ok(summary);
    };

    let (low, high) = mode.bounds(max_id);
    let total = if high >= low { (high - low + 1) as usize } else { 0 };
    let (first, last) = if mode.is_reverse() {
        (high, low)
    } else {
        (low, high)
    };
    tracing::info!(
        first,
        last,
        total,
        comments_only = mode.is_comments_only(),
        delay = ?options.delay,
        "Starting replay"
    );
    emit(
        on_progress,
        ReplayProgress::Starting {
            first,
            last,
            total,
            comments_only: mode.is_comments_only(),
        },
    );

    for id in mode.identifiers(max_id) {
        let outcome = match mode {
            ReplayMode::Full { .. } => {
                let outcome =
                    replay_issue(tracker, plan, id, options, &mut summary, on_progress).await;
                if outcome.is_ok() {
                    pace(options.delay).await;
                }
                outcome
            }
            ReplayMode::CommentsOnly { .. } => {
                replay_comments(tracker, plan, id, options, &mut summary, on_progress).await
            }
        };

        match outcome {
            Ok(step) => {
                emit(on_progress, ReplayProgress::Completed(step.clone()));
                summary.steps.push(step);
            }
            Err(source) => {
                tracing::error!(id, error = %source, "Replay stopped");
                emit(
                    on_progress,
                    ReplayProgress::Failed {
                        id,
                        error: source.to_string(),
                    },
                );
                return Err(MigrationError::RemoteCreate { id, source });
            }
        }
    }

    summary.requests = tracker.request_count();
    emit(
        on_progress,
        ReplayProgress::Finished {
            steps: summary.steps.len(),
            requests: summary.requests,
        },
    );
    Ok(summary)
}

/// Create a single exported issue and its comments, without pacing.
pub async fn post_single<T>(
    tracker: &T,
    plan: &ReplayPlan,
    id: IssueId,
    repo: &str,
    on_progress: Option<&ProgressCallback>,
) -> Result<ReplayStep>
where
    T: IssueTracker + ?Sized,
{
    let issue = plan.get(id).ok_or(MigrationError::UnknownIssue { id })?;
    let mut summary = ReplaySummary::default();

    let step = create_with_comments(tracker, issue, id, repo, &mut summary, on_progress)
        .await
        .map_err(|source| MigrationError::RemoteCreate { id, source })?;
    emit(on_progress, ReplayProgress::Completed(step.clone()));
    Ok(step)
}

async fn replay_issue<T>(
    tracker: &T,
    plan: &ReplayPlan,
    id: IssueId,
    options: &ReplayOptions,
    summary: &mut ReplaySummary,
    on_progress: Option<&ProgressCallback>,
) -> std::result::Result<ReplayStep, GitHubError>
where
    T: IssueTracker + ?Sized,
{
    match plan.get(id) {
        Some(issue) => {
            create_with_comments(tracker, issue, id, &options.repo, summary, on_progress).await
        }
        None => {
            let created = tracker.create_issue(&options.repo, &plan.placeholder).await?;
            check_numbering(id, created.number, on_progress);
            summary.placeholders_created += 1;
            Ok(ReplayStep::Placeholder { id })
        }
    }
}

async fn create_with_comments<T>(
    tracker: &T,
    issue: &TargetIssue,
    id: IssueId,
    repo: &str,
    summary: &mut ReplaySummary,
    on_progress: Option<&ProgressCallback>,
) -> std::result::Result<ReplayStep, GitHubError>
where
    T: IssueTracker + ?Sized,
{
    let created = tracker.create_issue(repo, issue).await?;
    let number = check_numbering(id, created.number, on_progress);
    summary.issues_created += 1;

    let total = issue.comments.len();
    for (index, comment) in issue.comments.iter().enumerate() {
        tracker.create_comment(repo, number, comment).await?;
        summary.comments_created += 1;
        emit(
            on_progress,
            ReplayProgress::CommentPosted {
                id,
                posted: index + 1,
                total,
            },
        );
    }

    Ok(ReplayStep::Issue {
        id,
        title: issue.title.clone(),
        comments: total,
    })
}

async fn replay_comments<T>(
    tracker: &T,
    plan: &ReplayPlan,
    id: IssueId,
    options: &ReplayOptions,
    summary: &mut ReplaySummary,
    on_progress: Option<&ProgressCallback>,
) -> std::result::Result<ReplayStep, GitHubError>
where
    T: IssueTracker + ?Sized,
{
    let Some(issue) = plan.get(id) else {
        return Ok(ReplayStep::Missing { id });
    };

    let total = issue.comments.len();
    for (index, comment) in issue.comments.iter().enumerate() {
        tracker.create_comment(&options.repo, id, comment).await?;
        summary.comments_created += 1;
        emit(
            on_progress,
            ReplayProgress::CommentPosted {
                id,
                posted: index + 1,
                total,
            },
        );
        pace(options.delay).await;
    }

    Ok(ReplayStep::Comments {
        id,
        title: issue.title.clone(),
        comments: total,
    })
}

/// The number comments should go to; warns when GitHub's numbering diverged.
fn check_numbering(
    id: IssueId,
    number: Option<u64>,
    on_progress: Option<&ProgressCallback>,
) -> u64 {
    match number {
        Some(number) if number != id => {
            tracing::warn!(id, number, "GitHub issue number differs from GitLab identifier");
            emit(on_progress, ReplayProgress::NumberingDrift { id, number });
            number
        }
        Some(number) => number,
        None => id,
    }
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
