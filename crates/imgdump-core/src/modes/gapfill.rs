use std::path::Path;
use std::sync::Arc;

use crate::batch::Batcher;
use crate::error::Result;
use crate::fetch::{fetch_image, Session};
use crate::image_dir::{highest_present_id, missing_ids};
use crate::summary::{ItemOutcome, RunSummary};

use super::{non_negative, require_dir, summarize, RunOptions};

/// Re-request every ID in `[offset, max)` that has no file in `dir`, where
/// `max` is the highest ID already present.
///
/// Files that exist are never re-downloaded, whatever their content; the
/// fetch is not verified. A directory with no `<id>.png` files is a no-op.
pub async fn gapfill(
    session: &Arc<Session>,
    dir: &Path,
    offset: i64,
    opts: RunOptions,
) -> Result<RunSummary> {
    let offset = non_negative(offset, "offset")?;
    require_dir(dir)?;
    opts.validate()?;

    let Some(max_image_id) = highest_present_id(dir)? else {
        tracing::info!(dir = %dir.display(), "no image files found; nothing to fill");
        return Ok(RunSummary::default());
    };

    tracing::info!(
        dir = %dir.display(),
        from = offset,
        below = max_image_id,
        "starting gap fill"
    );

    let mut batcher: Batcher<ItemOutcome> = Batcher::new(opts.batch_size);
    // Presence is checked lazily, as each ID is scheduled.
    for id in missing_ids(dir, offset, max_image_id) {
        let session = Arc::clone(session);
        let dir = dir.to_path_buf();
        batcher
            .push(async move {
                fetch_image(&session, &dir, id)
                    .await
                    .map(ItemOutcome::from)
            })
            .await?;
    }

    let summary = summarize(batcher).await?;
    tracing::info!(%summary, "gap fill finished");
    Ok(summary)
}
