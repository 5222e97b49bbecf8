//! The three acquisition modes: range dump, gap fill and incremental scan.
//!
//! All arguments are validated before the output directory is touched or
//! any request is made.

mod dump;
mod gapfill;
mod incremental;

pub use dump::dump;
pub use gapfill::gapfill;
pub use incremental::incremental;

use crate::batch::Batcher;
use crate::error::{FetchError, Result};
use crate::summary::{ItemOutcome, RunSummary};
use crate::verify::DEFAULT_ATTEMPTS;
use std::path::Path;

/// Settings shared by every mode.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Maximum number of concurrent downloads.
    pub batch_size: usize,
    /// Download attempts per ID in verified mode.
    pub verify_attempts: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: 20,
            verify_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl RunOptions {
    fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(FetchError::Validation("batch_size must be positive".into()));
        }
        Ok(())
    }
}

fn require_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(FetchError::Validation(format!(
            "path must be a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

fn non_negative(value: i64, name: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| FetchError::Validation(format!("{} must be non-negative", name)))
}

/// Drain the final batch and fold all outcomes into a summary.
async fn summarize(batcher: Batcher<ItemOutcome>) -> Result<RunSummary> {
    let report = batcher.finish().await?;
    let mut summary = RunSummary {
        batches: report.batches,
        ..RunSummary::default()
    };
    for outcome in report.outputs {
        summary.record(outcome);
    }
    Ok(summary)
}
