//! One full scrape-resolve-sync pass.
//!
//! Each stage returns its output value: listings become an ordered
//! candidate sequence, candidates become resolved links, and the links are
//! deduplicated into a set only at the boundary to the synchronizer.

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

use crate::listing::{ForumClient, Submission};
use crate::resolver;
use crate::sync;
use crate::transfer::Transfer;

/// Collects the deduplicated set of direct image URLs for `boards`.
///
/// Per board, the top and hot listings are concatenated; adult submissions
/// are dropped before resolution; per-link resolution failures are logged
/// and skipped.
pub fn collect_links(
    forum: &dyn ForumClient,
    boards: &[String],
    limit: u32,
) -> Result<HashSet<String>> {
    let mut candidates: Vec<Submission> = Vec::new();
    for board in boards {
        tracing::info!("processing {}", board);
        let top = forum.top(board, limit)?;
        let hot = forum.hot(board, limit)?;
        candidates.extend(hot);
        candidates.extend(top);
    }

    let mut resolved: Vec<String> = Vec::new();
    for submission in candidates {
        if submission.over_18 {
            tracing::debug!("skipping adult submission {}", submission.url);
            continue;
        }
        match resolver::resolve(&submission.url) {
            Ok(link) => resolved.push(link),
            Err(err) => tracing::warn!("unable to translate {}: {}", submission.url, err),
        }
    }

    Ok(resolved.into_iter().collect())
}

/// Runs one complete pass and returns how many new photos were stored.
pub fn run(
    forum: &dyn ForumClient,
    transfer: &dyn Transfer,
    boards: &[String],
    limit: u32,
    target: &Path,
) -> Result<usize> {
    let links = collect_links(forum, boards, limit)?;
    tracing::info!("storing {} photo link(s) to {}", links.len(), target.display());
    let stored = sync::sync_dir(target, &links, transfer)?;
    Ok(stored)
}
