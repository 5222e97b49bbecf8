//! Per-item outcomes and the end-of-run summary.

use crate::fetch::FetchOutcome;
use crate::image_dir::ImageId;
use std::fmt;

/// Print one status line for `id` to stdout (`"1234  : downloaded"`).
pub fn report(id: ImageId, message: &str) {
    println!("{}", status_line(id, message));
}

pub fn status_line(id: ImageId, message: &str) -> String {
    format!("{:<6}: {}", id, message)
}

/// Result of one scheduled task. Never an error: per-item failures are data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Downloaded,
    NotFound,
    Skipped(u32),
    Verified { attempts: u32 },
    VerifyFailed { attempts: u32 },
}

impl From<FetchOutcome> for ItemOutcome {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Downloaded => ItemOutcome::Downloaded,
            FetchOutcome::NotFound => ItemOutcome::NotFound,
            FetchOutcome::Skipped(status) => ItemOutcome::Skipped(status),
        }
    }
}

/// Aggregate of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// IDs that had a task scheduled.
    pub attempted: u64,
    /// Batch barriers passed (including the final partial batch).
    pub batches: u64,
    pub downloaded: u64,
    pub not_found: u64,
    pub skipped: u64,
    pub verified: u64,
    pub verify_failed: u64,
    /// Extra downloads spent on retries after a failed verification.
    pub retries: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.attempted += 1;
        match outcome {
            ItemOutcome::Downloaded => self.downloaded += 1,
            ItemOutcome::NotFound => self.not_found += 1,
            ItemOutcome::Skipped(_) => self.skipped += 1,
            ItemOutcome::Verified { attempts } => {
                self.verified += 1;
                self.retries += u64::from(attempts.saturating_sub(1));
            }
            ItemOutcome::VerifyFailed { attempts } => {
                self.verify_failed += 1;
                self.retries += u64::from(attempts.saturating_sub(1));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attempted == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} id(s) in {} batch(es): {} downloaded, {} verified, {} failed to verify, \
             {} not found, {} skipped, {} retries",
            self.attempted,
            self.batches,
            self.downloaded,
            self.verified,
            self.verify_failed,
            self.not_found,
            self.skipped,
            self.retries
        )
    }
}
