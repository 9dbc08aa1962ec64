use issuelift::replay::ReplayProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: ReplayProgress) {
        match event {
            ReplayProgress::Starting {
                first,
                last,
                total,
                comments_only,
            } => {
                tracing::info!(first, last, total, comments_only, "Replaying identifiers");
            }

            ReplayProgress::CommentPosted { id, posted, total } => {
                tracing::debug!(id, posted, total, "Posted comment");
            }

            ReplayProgress::Completed(step) => {
                tracing::info!("{}", step);
            }

            ReplayProgress::NumberingDrift { id, number } => {
                tracing::warn!(id, number, "GitHub numbering drifted from GitLab");
            }

            ReplayProgress::Failed { id, error } => {
                tracing::error!(id, error = %error, "Replay stopped");
            }

            ReplayProgress::Finished { steps, requests } => {
                tracing::info!(steps, requests, "Replay complete");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
