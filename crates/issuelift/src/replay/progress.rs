//! Progress events emitted while replaying.

use super::types::ReplayStep;
use crate::source::IssueId;

/// Progress events emitted during a replay run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ReplayProgress {
    /// The run is about to visit `total` identifiers.
    Starting {
        first: IssueId,
        last: IssueId,
        total: usize,
        comments_only: bool,
    },

    /// One comment was created.
    CommentPosted {
        id: IssueId,
        posted: usize,
        total: usize,
    },

    /// An identifier was fully processed.
    Completed(ReplayStep),

    /// GitHub assigned a different number than the identifier being replayed.
    NumberingDrift { id: IssueId, number: u64 },

    /// The run stopped at `id`.
    Failed { id: IssueId, error: String },

    /// The run went through every identifier.
    Finished { steps: usize, requests: usize },
}

/// Callback type for progress reporting.
pub type ProgressCallback = Box<dyn Fn(ReplayProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: ReplayProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
