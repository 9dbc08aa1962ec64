use issuelift::{IssueId, IssueTracker};
use issuelift::github::validate_repo;
use issuelift::replay::post_single;

use super::shared::Context;
use crate::TargetOptions;

/// Create a single issue and its comments, without pacing.
pub(crate) async fn handle_post(
    ctx: &Context<'_>,
    id: IssueId,
    target: &TargetOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_repo(&target.repo)?;
    let plan = ctx.plan(ctx.config.labels(&target.labels))?;
    let client = ctx.client(target.dry_run)?;

    let step = post_single(&client, &plan, id, &target.repo, None).await?;
    println!("{step}");
    tracing::info!(
        requests = client.request_count(),
        dry_run = target.dry_run,
        "Posted issue"
    );
    Ok(())
}
