//! Export loading and client construction shared by the commands.

use issuelift::replay::ReplayPlan;
use issuelift::{
    Converter, GitHubClient, MigrationError, SourceIssue, UserMapping, curate, read_export,
};

use crate::GlobalArgs;
use crate::config::Config;

/// Global flags resolved against configuration.
pub(crate) struct Context<'a> {
    pub(crate) globals: &'a GlobalArgs,
    pub(crate) config: &'a Config,
}

impl<'a> Context<'a> {
    pub(crate) fn new(globals: &'a GlobalArgs, config: &'a Config) -> Self {
        Self { globals, config }
    }

    /// Parse the export without curating it.
    pub(crate) fn read_issues(&self) -> Result<Vec<SourceIssue>, MigrationError> {
        let issues = read_export(&self.globals.export)?;
        tracing::debug!(
            path = %self.globals.export.display(),
            count = issues.len(),
            "Parsed export"
        );
        Ok(issues)
    }

    /// Parse and curate the export.
    pub(crate) fn curated_issues(&self) -> Result<Vec<SourceIssue>, MigrationError> {
        let filter = self.config.exclusion_filter(&self.globals.filter);
        Ok(curate(self.read_issues()?, &filter))
    }

    pub(crate) fn user_mapping(&self) -> Result<UserMapping, MigrationError> {
        UserMapping::from_pairs(self.config.user_pairs(&self.globals.users))
    }

    /// Build a converter attaching `labels` to every issue.
    pub(crate) fn converter(&self, labels: Vec<String>) -> Result<Converter, MigrationError> {
        let rules = self.config.rewrite_rules(&self.globals.replace);
        Converter::new(self.user_mapping()?, labels, &rules)
    }

    /// Curate and convert the export, failing before any network call.
    pub(crate) fn plan(&self, labels: Vec<String>) -> Result<ReplayPlan, MigrationError> {
        let converter = self.converter(labels)?;
        let filter = self.config.exclusion_filter(&self.globals.filter);
        ReplayPlan::prepare(self.read_issues()?, &filter, &converter)
    }

    pub(crate) fn client(&self, dry_run: bool) -> Result<GitHubClient, Box<dyn std::error::Error>> {
        let token = self
            .config
            .github_token(self.globals.token.as_deref())
            .ok_or(
                "No GitHub token configured. Pass --token or set ISSUELIFT_GITHUB__TOKEN.",
            )?;
        let client = GitHubClient::with_api_url(self.config.api_url(), &token)?
            .with_dry_run(dry_run)
            .with_debug(self.globals.debug);
        Ok(client)
    }
}
