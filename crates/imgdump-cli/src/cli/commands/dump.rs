//! `imgdump dump` – download and verify a fixed ID range.

use imgdump_core::error::FetchError;
use imgdump_core::fetch::Session;
use imgdump_core::modes::{self, RunOptions};
use imgdump_core::summary::RunSummary;
use std::path::Path;
use std::sync::Arc;

pub async fn run_dump(
    session: &Arc<Session>,
    dir: &Path,
    max_image_id: i64,
    offset: i64,
    opts: RunOptions,
) -> Result<RunSummary, FetchError> {
    tracing::info!(
        "dump dir={} max_image_id={} offset={} batch_size={}",
        dir.display(),
        max_image_id,
        offset,
        opts.batch_size
    );
    modes::dump(session, dir, max_image_id, offset, opts).await
}
