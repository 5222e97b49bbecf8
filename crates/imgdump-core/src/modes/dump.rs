use std::path::Path;
use std::sync::Arc;

use crate::batch::Batcher;
use crate::error::{FetchError, Result};
use crate::fetch::Session;
use crate::summary::{ItemOutcome, RunSummary};
use crate::verify::fetch_and_verify;

use super::{non_negative, summarize, RunOptions};

/// Download and verify every ID in `(offset, max_image_id]` into `dir`.
///
/// Creates `dir` if needed. Existing files with colliding names are
/// overwritten.
pub async fn dump(
    session: &Arc<Session>,
    dir: &Path,
    max_image_id: i64,
    offset: i64,
    opts: RunOptions,
) -> Result<RunSummary> {
    if max_image_id <= 0 {
        return Err(FetchError::Validation("max_image_id must be positive".into()));
    }
    let offset = non_negative(offset, "offset")?;
    let max_image_id = max_image_id as u64;
    if offset >= max_image_id {
        return Err(FetchError::Validation(
            "offset must be less than max_image_id".into(),
        ));
    }
    opts.validate()?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FetchError::io(format!("create {}", dir.display()), e))?;

    tracing::info!(
        dir = %dir.display(),
        first = offset + 1,
        last = max_image_id,
        batch_size = opts.batch_size,
        "starting dump"
    );

    let mut batcher: Batcher<ItemOutcome> = Batcher::new(opts.batch_size);
    for id in (offset + 1)..=max_image_id {
        let session = Arc::clone(session);
        let dir = dir.to_path_buf();
        let attempts = opts.verify_attempts;
        batcher
            .push(async move { fetch_and_verify(&session, &dir, id, attempts).await })
            .await?;
    }

    let summary = summarize(batcher).await?;
    tracing::info!(%summary, "dump finished");
    Ok(summary)
}
