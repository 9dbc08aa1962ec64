use issuelift::UserMapping;
use issuelift::source::unique_user_ids;

use super::shared::Context;

/// One output line: the id, and the GitHub handle it maps to when known.
fn describe(id: u64, mapping: &UserMapping) -> String {
    match mapping.handle_for(id) {
        Some(handle) => format!("{id}\t@{handle}"),
        None => id.to_string(),
    }
}

/// Print the unique GitLab user ids referenced by the export.
pub(crate) fn handle_users(ctx: &Context<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let issues = ctx.curated_issues()?;
    let mapping = ctx.user_mapping()?;
    let ids = unique_user_ids(&issues);

    println!("Unique User IDs:");
    let mut unmapped = 0;
    for id in &ids {
        if mapping.handle_for(*id).is_none() {
            unmapped += 1;
        }
        println!("{}", describe(*id, &mapping));
    }

    tracing::info!(users = ids.len(), unmapped, "Listed users");
    Ok(())
}
