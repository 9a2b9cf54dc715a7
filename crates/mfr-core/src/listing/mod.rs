//! Board listings: the submission model and the forum client capability.
//!
//! The run pipeline only depends on the [`ForumClient`] trait; the Reddit
//! implementation lives in [`reddit`] and is plain HTTP plumbing.

mod parse;
mod reddit;

pub use reddit::{RedditClient, DEFAULT_BASE_URL};

use anyhow::Result;

/// One forum submission: the outbound URL plus the adult-content flag.
/// Produced per listing entry, consumed once by the resolution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub over_18: bool,
}

/// Capability to fetch ranked submission listings for a named board.
pub trait ForumClient {
    /// Top-ranked submissions, newest query each call.
    fn top(&self, board: &str, limit: u32) -> Result<Vec<Submission>>;

    /// Currently-popular submissions.
    fn hot(&self, board: &str, limit: u32) -> Result<Vec<Submission>>;
}
