use console::style;
use issuelift::{IssueId, MigrationError, TargetIssue};

use super::shared::Context;

const SEPARATOR: &str = "=============================================";

fn render(summary: &str, issue: &TargetIssue) -> String {
    let mut out = format!("{summary}\n{}\n", issue.body);
    for comment in &issue.comments {
        out.push_str(&comment.body);
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

/// Print one issue as it would be posted, followed by its comments.
pub(crate) fn handle_show(ctx: &Context<'_>, id: IssueId) -> Result<(), Box<dyn std::error::Error>> {
    let issues = ctx.curated_issues()?;
    let source = issues
        .iter()
        .find(|i| i.id == id)
        .ok_or(MigrationError::UnknownIssue { id })?;

    let converter = ctx.converter(ctx.config.labels(&[]))?;
    let issue = converter.convert_issue(source);

    println!("{}", style(&issue.title).bold());
    print!("{}", render(&source.summarize(), &issue));
    Ok(())
}
