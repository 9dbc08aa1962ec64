use std::sync::Arc;
use std::time::{Duration, Instant};

use issuelift::github::validate_repo;
use issuelift::replay::{ReplayMode, ReplayOptions, ReplaySummary, replay};
use issuelift::{GitHubClient, IssueId, IssueTracker, MigrationError};

use super::shared::Context;
use crate::TargetOptions;
use crate::progress::ProgressReporter;

/// Replay bounds and pacing from the command line.
#[derive(Debug, Clone)]
pub(crate) struct ImportArgs {
    pub(crate) start: IssueId,
    pub(crate) end: Option<IssueId>,
    pub(crate) comments: bool,
    pub(crate) reverse: bool,
    pub(crate) delay: Option<Duration>,
}

/// Replay the whole export onto GitHub.
pub(crate) async fn handle_import(
    ctx: &Context<'_>,
    target: &TargetOptions,
    args: ImportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = ReplayMode::from_flags(args.start, args.end, args.comments, args.reverse)?;
    validate_repo(&target.repo)?;

    let plan = ctx.plan(ctx.config.labels(&target.labels))?;
    if plan.is_empty() {
        tracing::warn!(path = %ctx.globals.export.display(), "No issues found in export");
        return Ok(());
    }

    let client = ctx.client(target.dry_run)?;
    let options = ReplayOptions::new(&target.repo).with_delay(ctx.config.delay(args.delay));
    let planned = plan.request_estimate(mode);

    if !target.dry_run {
        check_rate_limit(&client, planned).await;
    }

    tracing::info!(
        "Starting from ID={} [delay={}] [requests={}]",
        args.start,
        humantime::format_duration(options.delay),
        planned
    );
    let started = Instant::now();

    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();
    let result = replay(&client, &plan, mode, &options, Some(&callback)).await;
    reporter.finish();

    let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
    tracing::info!(
        "Duration: {} Request Count: {}",
        humantime::format_duration(elapsed),
        client.request_count()
    );

    let summary = result.inspect_err(|e| resume_hint(e, args.comments))?;
    println!("{}", totals(&summary, target.dry_run));
    Ok(())
}

/// Tell the user how to pick the run up again.
fn resume_hint(error: &MigrationError, comments_only: bool) {
    let Some(id) = error.issue_id() else {
        return;
    };
    if let MigrationError::RemoteCreate { source, .. } = error
        && source.is_rate_limited()
    {
        tracing::warn!("GitHub rate limit reached; wait for the reset before resuming");
    }
    if comments_only {
        tracing::warn!(
            "Comments on #{id} may be partially posted; check the issue before resuming with --start {id}"
        );
    } else {
        tracing::warn!(
            "Issue #{id} may already exist; check the repository, then resume with --start {id} or {}",
            id + 1
        );
    }
}

/// Warn when the remaining core quota cannot cover the run.
async fn check_rate_limit(client: &GitHubClient, planned: usize) {
    match client.rate_limit().await {
        Ok(core) if core.remaining < planned => {
            tracing::warn!(
                remaining = core.remaining,
                planned,
                reset_at = %core.reset_at(),
                "Rate limit will run out before the import finishes"
            );
        }
        Ok(core) => {
            tracing::debug!(remaining = core.remaining, planned, "Rate limit sufficient");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not query rate limit");
        }
    }
}

fn totals(summary: &ReplaySummary, dry_run: bool) -> String {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    format!(
        "{prefix}{} issues, {} placeholders, {} comments, {} requests",
        summary.issues_created,
        summary.placeholders_created,
        summary.comments_created,
        summary.requests
    )
}
