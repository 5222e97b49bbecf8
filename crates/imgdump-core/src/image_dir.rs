//! Directory state: the output directory is the only record of what has
//! been downloaded. A file named `<id>.png` means the ID is present.

use crate::error::{FetchError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Numeric identifier of a remote image; also the local file stem.
pub type ImageId = u64;

/// Extension (without dot) of downloaded image files.
pub const IMAGE_EXTENSION: &str = "png";

pub fn image_file_name(id: ImageId) -> String {
    format!("{}.{}", id, IMAGE_EXTENSION)
}

pub fn image_path(dir: &Path, id: ImageId) -> PathBuf {
    dir.join(image_file_name(id))
}

/// Classification of one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    /// `<id>.png`
    Image(ImageId),
    /// `.png` file whose stem is not an ID (e.g. `abc.png`, `-1.png`).
    Misnamed(String),
    /// Anything else; ignored.
    Other,
}

fn classify(path: &Path) -> Entry {
    let is_image = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == IMAGE_EXTENSION);
    if !is_image {
        return Entry::Other;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse::<ImageId>().ok())
    {
        Some(id) => Entry::Image(id),
        None => Entry::Misnamed(name),
    }
}

fn entries(dir: &Path) -> Result<Vec<Entry>> {
    let read = fs::read_dir(dir)
        .map_err(|e| FetchError::io(format!("read directory {}", dir.display()), e))?;
    let mut out = Vec::new();
    for entry in read {
        let entry =
            entry.map_err(|e| FetchError::io(format!("read directory {}", dir.display()), e))?;
        out.push(classify(&entry.path()));
    }
    Ok(out)
}

/// Highest image ID in `dir`, or `None` if it holds no `<id>.png` files.
///
/// A `.png` file with a non-numeric stem means the directory holds foreign
/// files and fails the scan with [`FetchError::NamingConvention`].
pub fn scan_max_id(dir: &Path) -> Result<Option<ImageId>> {
    let mut max = None;
    for entry in entries(dir)? {
        match entry {
            Entry::Image(id) => max = max.max(Some(id)),
            Entry::Misnamed(name) => return Err(FetchError::NamingConvention { name }),
            Entry::Other => {}
        }
    }
    Ok(max)
}

/// Like [`scan_max_id`] but skips misnamed `.png` files instead of failing.
pub fn highest_present_id(dir: &Path) -> Result<Option<ImageId>> {
    let max = entries(dir)?
        .into_iter()
        .filter_map(|e| match e {
            Entry::Image(id) => Some(id),
            _ => None,
        })
        .max();
    Ok(max)
}

pub fn is_present(dir: &Path, id: ImageId) -> bool {
    image_path(dir, id).exists()
}

/// IDs in `[from, to)` with no file in `dir`, in ascending order.
pub fn missing_ids(dir: &Path, from: ImageId, to: ImageId) -> impl Iterator<Item = ImageId> + '_ {
    (from..to).filter(move |id| !is_present(dir, *id))
}
