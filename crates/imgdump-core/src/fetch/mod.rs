//! Single image fetch: one GET, body written to `<id>.png` on HTTP 200.

mod endpoint;
mod session;

pub use endpoint::Endpoint;
pub use session::Session;

use crate::error::{FetchError, Result};
use crate::image_dir::{image_path, ImageId};
use crate::summary::report;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What the server said about one ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 200; the body was written to disk.
    Downloaded,
    /// 404; the ID does not exist (yet).
    NotFound,
    /// Any other status; nothing was written.
    Skipped(u32),
}

/// Blocking fetch of `id` into `dir`. Overwrites an existing file on 200.
pub fn fetch_image_blocking(session: &Session, dir: &Path, id: ImageId) -> Result<FetchOutcome> {
    let url = session.endpoint().image_url(id)?;
    tracing::debug!(id, url = %url, "GET");
    let response = session
        .get_blocking(&url)
        .map_err(|source| FetchError::Transport { id, source })?;

    let outcome = match response.status {
        200 => {
            let path = image_path(dir, id);
            std::fs::write(&path, &response.body)
                .map_err(|e| FetchError::io(format!("write {}", path.display()), e))?;
            report(id, "downloaded");
            FetchOutcome::Downloaded
        }
        404 => {
            report(id, "not found");
            FetchOutcome::NotFound
        }
        status => {
            tracing::warn!(id, status, "unexpected status, skipping");
            report(id, &format!("skipped {}", status));
            FetchOutcome::Skipped(status)
        }
    };
    Ok(outcome)
}

/// Async wrapper: runs the transfer and the file write on the blocking pool.
pub async fn fetch_image(session: &Arc<Session>, dir: &Path, id: ImageId) -> Result<FetchOutcome> {
    let session = Arc::clone(session);
    let dir: PathBuf = dir.to_path_buf();
    tokio::task::spawn_blocking(move || fetch_image_blocking(&session, &dir, id)).await?
}
