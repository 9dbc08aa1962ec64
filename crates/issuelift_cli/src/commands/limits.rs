use clap::ValueEnum;
use issuelift::MigrationError;
use issuelift::github::{GitHubRateLimits, RateLimitResource, get_rate_limits};

use super::shared::Context;

/// Output format for rate limit display.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// Query and print the GitHub rate limits.
pub(crate) async fn handle_limits(
    ctx: &Context<'_>,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = ctx.client(false)?;
    let rate_limits = get_rate_limits(&client)
        .await
        .map_err(MigrationError::RateLimitQuery)?;

    let items = rate_limits_to_display(&rate_limits.resources);
    println!("{}", RateLimitDisplay::render(items, output)?);
    Ok(())
}

/// Rate limit information for display.
#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
pub(crate) struct RateLimitDisplay {
    #[tabled(rename = "Resource")]
    pub resource: String,
    #[tabled(rename = "Limit")]
    pub limit: String,
    #[tabled(rename = "Used")]
    pub used: String,
    #[tabled(rename = "Remaining")]
    pub remaining: String,
    #[tabled(rename = "Usage %")]
    pub usage_percent: String,
    #[tabled(rename = "Resets At")]
    pub reset_at: String,
    #[tabled(rename = "Resets In")]
    pub reset_in: String,
}

impl RateLimitDisplay {
    pub(crate) fn from_resource(name: &str, resource: &RateLimitResource) -> Self {
        let usage_percent = if resource.limit > 0 {
            (resource.used as f64 / resource.limit as f64) * 100.0
        } else {
            0.0
        };
        let reset_at = resource.reset_at();
        let remaining_secs = reset_at.signed_duration_since(chrono::Utc::now()).num_seconds();
        let reset_in = if remaining_secs > 0 {
            humantime::format_duration(std::time::Duration::from_secs(remaining_secs as u64))
                .to_string()
        } else {
            "now".to_string()
        };

        Self {
            resource: name.to_string(),
            limit: resource.limit.to_string(),
            used: resource.used.to_string(),
            remaining: resource.remaining.to_string(),
            usage_percent: format!("{:.1}%", usage_percent),
            reset_at: reset_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            reset_in,
        }
    }

    pub(crate) fn render(
        items: Vec<Self>,
        format: OutputFormat,
    ) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Table => {
                let mut table = tabled::Table::new(items);
                table.with(tabled::settings::Style::rounded());
                Ok(table.to_string())
            }
            OutputFormat::Json => serde_json::to_string_pretty(&items),
        }
    }
}

/// Core first, then whichever optional resources GitHub reported.
pub(crate) fn rate_limits_to_display(limits: &GitHubRateLimits) -> Vec<RateLimitDisplay> {
    let mut items = vec![RateLimitDisplay::from_resource("core", &limits.core)];
    if let Some(ref r) = limits.search {
        items.push(RateLimitDisplay::from_resource("search", r));
    }
    if let Some(ref r) = limits.graphql {
        items.push(RateLimitDisplay::from_resource("graphql", r));
    }
    items
}
