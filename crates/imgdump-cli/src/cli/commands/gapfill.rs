//! `imgdump gapfill` – re-request IDs missing below the current maximum.

use imgdump_core::error::FetchError;
use imgdump_core::fetch::Session;
use imgdump_core::modes::{self, RunOptions};
use imgdump_core::summary::RunSummary;
use std::path::Path;
use std::sync::Arc;

pub async fn run_gapfill(
    session: &Arc<Session>,
    dir: &Path,
    offset: i64,
    opts: RunOptions,
) -> Result<RunSummary, FetchError> {
    tracing::info!(
        "gapfill dir={} offset={} batch_size={}",
        dir.display(),
        offset,
        opts.batch_size
    );
    let summary = modes::gapfill(session, dir, offset, opts).await?;
    if summary.is_empty() {
        println!("No gaps to fill in {}.", dir.display());
    }
    Ok(summary)
}
