use std::path::Path;
use std::sync::Arc;

use crate::error::{FetchError, Result};
use crate::fetch::Session;
use crate::image_dir::scan_max_id;
use crate::summary::RunSummary;

use super::{dump, require_dir, RunOptions};

/// Probe the `count` IDs following the highest ID in `dir`.
///
/// New IDs beyond that window are left for the next run.
pub async fn incremental(
    session: &Arc<Session>,
    dir: &Path,
    count: i64,
    opts: RunOptions,
) -> Result<RunSummary> {
    if count < 1 {
        return Err(FetchError::Validation("count must be positive".into()));
    }
    require_dir(dir)?;
    opts.validate()?;

    let current_max = scan_max_id(dir)?.unwrap_or(0);
    let current_max = i64::try_from(current_max)
        .map_err(|_| FetchError::Validation(format!("image ID {} out of range", current_max)))?;
    let upper = current_max
        .checked_add(count)
        .ok_or_else(|| FetchError::Validation("count overflows the ID range".into()))?;

    println!("Starting incremental dump at ID {}", current_max + 1);
    tracing::info!(dir = %dir.display(), start = current_max + 1, count, "incremental scan");

    dump(session, dir, upper, current_max, opts).await
}
