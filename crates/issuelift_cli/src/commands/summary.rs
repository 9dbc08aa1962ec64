use super::shared::Context;

/// Print one line per curated issue.
pub(crate) fn handle_summary(ctx: &Context<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let issues = ctx.curated_issues()?;
    if issues.is_empty() {
        tracing::warn!(path = %ctx.globals.export.display(), "No issues found in export");
        return Ok(());
    }

    for issue in &issues {
        println!("{}", issue.summarize());
    }
    println!("{} issues", issues.len());
    Ok(())
}
