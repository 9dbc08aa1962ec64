use std::sync::Mutex;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use issuelift::replay::ReplayProgress;

/// Interactive progress reporter using indicatif.
///
/// One bar spans the identifiers of the run; per-identifier lines are
/// printed above it.
pub struct InteractiveReporter {
    bar: Mutex<Option<ProgressBar>>,
    target: fn() -> ProgressDrawTarget,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            target: ProgressDrawTarget::stderr,
        }
    }

    /// A reporter that never draws.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            target: ProgressDrawTarget::hidden,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar
            .lock()
            .unwrap()
            .as_ref()
            .map(ProgressBar::position)
            .unwrap_or(0)
    }

    pub fn handle(&self, event: ReplayProgress) {
        let mut bar = self.bar.lock().unwrap();

        match event {
            ReplayProgress::Starting {
                first,
                last,
                total,
                comments_only,
            } => {
                let pb = ProgressBar::with_draw_target(Some(total as u64), (self.target)());
                pb.set_style(Self::bar_style());
                pb.set_prefix(if comments_only { "comments" } else { "issues" });
                pb.set_message(format!("#{first} → #{last}"));
                *bar = Some(pb);
            }

            ReplayProgress::CommentPosted { id, posted, total } => {
                if let Some(pb) = bar.as_ref() {
                    pb.set_message(format!("#{id} comment {posted}/{total}"));
                }
            }

            ReplayProgress::Completed(step) => {
                if let Some(pb) = bar.as_ref() {
                    pb.println(step.to_string());
                    pb.inc(1);
                    pb.set_message(format!("#{}", step.id()));
                }
            }

            ReplayProgress::NumberingDrift { id, number } => {
                if let Some(pb) = bar.as_ref() {
                    pb.println(format!(
                        "{} [#{id}] created as #{number}",
                        style("warning:").yellow().bold()
                    ));
                }
            }

            ReplayProgress::Failed { id, error } => {
                if let Some(pb) = bar.as_ref() {
                    pb.println(format!("{} [#{id}] {error}", style("error:").red().bold()));
                    pb.abandon_with_message(format!("stopped at #{id}"));
                }
            }

            ReplayProgress::Finished { steps, requests } => {
                if let Some(pb) = bar.as_ref() {
                    pb.finish_with_message(format!("{steps} done, {requests} requests"));
                }
            }

            _ => {}
        }
    }

    /// Finish the progress bar if the run did not.
    pub fn finish(&self) {
        let bar = self.bar.lock().unwrap();
        if let Some(ref pb) = *bar
            && !pb.is_finished()
        {
            pb.finish();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
