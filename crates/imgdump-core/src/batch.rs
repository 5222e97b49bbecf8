//! Fixed-size batch runner.
//!
//! Up to `batch_size` tasks are spawned together; the next batch starts only
//! after every task in the current one has finished. A failing task never
//! cancels its siblings: the batch always drains, then the first error is
//! returned.

use crate::error::{FetchError, Result};
use std::future::Future;
use tokio::task::JoinSet;

pub struct Batcher<T> {
    batch_size: usize,
    in_flight: JoinSet<Result<T>>,
    completed: Vec<T>,
    batches: u64,
}

/// Outputs of every task (completion order) and the number of batches run.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub outputs: Vec<T>,
    pub batches: u64,
}

impl<T: Send + 'static> Batcher<T> {
    /// `batch_size` of 0 is treated as 1.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            in_flight: JoinSet::new(),
            completed: Vec::new(),
            batches: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Spawn `task`; if that fills the batch, wait for the whole batch.
    pub async fn push<F>(&mut self, task: F) -> Result<()>
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        self.in_flight.spawn(task);
        if self.in_flight.len() >= self.batch_size {
            self.drain().await?;
        }
        Ok(())
    }

    async fn drain(&mut self) -> Result<()> {
        let mut first_err: Option<FetchError> = None;
        while let Some(joined) = self.in_flight.join_next().await {
            match joined.map_err(FetchError::from).and_then(|r| r) {
                Ok(output) => self.completed.push(output),
                Err(e) => {
                    tracing::debug!(error = %e, "task failed; draining rest of batch");
                    first_err.get_or_insert(e);
                }
            }
        }
        self.batches += 1;
        tracing::trace!(batch = self.batches, "batch drained");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Wait for the final partial batch and return everything collected.
    pub async fn finish(mut self) -> Result<BatchReport<T>> {
        if !self.in_flight.is_empty() {
            self.drain().await?;
        }
        Ok(BatchReport {
            outputs: self.completed,
            batches: self.batches,
        })
    }
}
