//! Integrity check of downloaded files and the fetch-and-verify retry loop.
//!
//! The file server occasionally serves truncated or corrupt bytes, so a
//! verified download is decoded in full before it is kept.

use crate::error::{FetchError, Result};
use crate::fetch::{fetch_image, Session};
use crate::image_dir::{image_path, ImageId};
use crate::summary::{report, ItemOutcome};
use image::ImageFormat;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default download attempts per ID in verified mode.
pub const DEFAULT_ATTEMPTS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("read: {0}")]
    Read(#[from] io::Error),
    #[error("decode: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode `bytes` as PNG. Returns the image dimensions on success.
pub fn verify_png_bytes(bytes: &[u8]) -> Result<(u32, u32), VerifyError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok((img.width(), img.height()))
}

/// Read and decode the file at `path`. A missing file is a `Read` error.
pub fn verify_png_file(path: &Path) -> Result<(u32, u32), VerifyError> {
    let bytes = std::fs::read(path)?;
    verify_png_bytes(&bytes)
}

async fn verify_on_blocking_pool(path: PathBuf) -> Result<Result<(u32, u32), VerifyError>> {
    Ok(tokio::task::spawn_blocking(move || verify_png_file(&path)).await?)
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FetchError::io(format!("remove {}", path.display()), e)),
    }
}

/// Fetch `id` and decode the result, retrying up to `attempts` times.
///
/// Any failed attempt (corrupt bytes, 404, other status) deletes the file
/// and consumes one attempt. After the last failure no file is left behind.
/// Only transport and filesystem errors are returned as `Err`.
pub async fn fetch_and_verify(
    session: &Arc<Session>,
    dir: &Path,
    id: ImageId,
    attempts: u32,
) -> Result<ItemOutcome> {
    let attempts = attempts.max(1);
    let path = image_path(dir, id);

    for attempt in 1..=attempts {
        let fetched = fetch_image(session, dir, id).await?;
        match verify_on_blocking_pool(path.clone()).await? {
            Ok((width, height)) => {
                tracing::debug!(id, attempt, width, height, "verified");
                report(id, "verified");
                return Ok(ItemOutcome::Verified { attempts: attempt });
            }
            Err(err) => {
                tracing::warn!(id, attempt, ?fetched, error = %err, "verification failed");
                report(id, "failed to verify, retrying...");
                remove_if_present(&path).await?;
            }
        }
    }

    report(id, "failed to verify, deleting file");
    Ok(ItemOutcome::VerifyFailed { attempts })
}
