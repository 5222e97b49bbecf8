//! `imgdump incremental` – probe a window of IDs past the current maximum.

use imgdump_core::error::FetchError;
use imgdump_core::fetch::Session;
use imgdump_core::modes::{self, RunOptions};
use imgdump_core::summary::RunSummary;
use std::path::Path;
use std::sync::Arc;

pub async fn run_incremental(
    session: &Arc<Session>,
    dir: &Path,
    count: i64,
    opts: RunOptions,
) -> Result<RunSummary, FetchError> {
    tracing::info!(
        "incremental dir={} count={} batch_size={}",
        dir.display(),
        count,
        opts.batch_size
    );
    modes::incremental(session, dir, count, opts).await
}
