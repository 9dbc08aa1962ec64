//! Replaying a converted export onto GitHub.
//!
//! # Module Structure
//!
//! - [`types`] - Modes, options, the replay plan and per-identifier outcomes
//! - [`progress`] - Progress reporting: `ReplayProgress`, `ProgressCallback`, `emit()`
//! - [`engine`] - The sequential replay loop: `replay()`, `post_single()`
//!
//! # Example
//!
//! ```ignore
//! use issuelift::replay::{ReplayMode, ReplayOptions, ReplayPlan, replay};
//!
//! let plan = ReplayPlan::prepare(issues, &filter, &converter)?;
//! let mode = ReplayMode::from_flags(1, None, false, false)?;
//! let summary = replay(&client, &plan, mode, &ReplayOptions::new("owner/repo"), None).await?;
//! ```

pub mod engine;
mod progress;
mod types;

pub use engine::{post_single, replay};

pub use progress::{ProgressCallback, ReplayProgress, emit};

pub use types::{DEFAULT_DELAY, ReplayMode, ReplayOptions, ReplayPlan, ReplayStep, ReplaySummary};
