//! Target-directory refresh: purge old images, store the new set.
//!
//! The purge-then-populate sequence is deliberately not transactional:
//! a fatal error between the two phases leaves the directory partially
//! empty, and re-running is the recovery path.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::transfer::Transfer;

/// Fatal synchronizer failures. Per-link fetch problems are not errors;
/// they are logged and skipped inside [`sync_dir`].
#[derive(Debug, Error)]
pub enum SyncError {
    /// The target directory is missing: nothing was deleted or written.
    #[error("target directory {} does not exist", .0.display())]
    MissingTargetDir(PathBuf),
    /// Unexpected I/O failure during purge or file write. No rollback.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn is_image_name(name: &str) -> bool {
    name.ends_with(".jpg") || name.ends_with(".png")
}

/// Refreshes `target` with the images behind `links`.
///
/// Deletes every `.jpg`/`.png` entry in `target` (other entries are left
/// alone), then fetches each link and writes successful responses under a
/// fresh uuid name, keeping `.png` for `.png` links and `.jpg` for
/// everything else. Returns how many files were written. Links that fetch
/// with a non-200 status or a transport error are logged and skipped.
pub fn sync_dir(
    target: &Path,
    links: &HashSet<String>,
    transfer: &dyn Transfer,
) -> Result<usize, SyncError> {
    if !target.is_dir() {
        return Err(SyncError::MissingTargetDir(target.to_path_buf()));
    }

    for entry in fs::read_dir(target)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if is_image_name(name) {
                tracing::debug!("removing old photo {}", name);
                fs::remove_file(entry.path())?;
            }
        }
    }

    let mut stored = 0usize;
    for link in links {
        let resp = match transfer.get(link) {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!("fetch of {} failed: {:#}", link, err);
                continue;
            }
        };
        if resp.status != 200 {
            tracing::error!("{} returned a status code of {}", link, resp.status);
            continue;
        }

        let ext = if link.ends_with(".png") { "png" } else { "jpg" };
        let path = target.join(format!("{}.{}", Uuid::new_v4(), ext));
        fs::write(&path, &resp.body)?;
        tracing::debug!("stored {} as {}", link, path.display());
        stored += 1;
    }

    Ok(stored)
}
