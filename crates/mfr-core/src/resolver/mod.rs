//! Link resolution: submission URLs to direct image URLs.
//!
//! Submissions point at images directly, or through redirector hosts
//! (quickmeme, imgur) whose page URLs have to be rewritten before the raw
//! bytes can be fetched. Rules are an ordered table; the first matching
//! rule decides.

mod key;

pub use key::image_key;

use thiserror::Error;

/// Why a submission URL could not be turned into a direct image URL.
/// Both variants are per-link: the link is dropped and the run continues.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No rewrite rule recognizes the host.
    #[error("no rule matches {0}")]
    UnrecognizedHost(String),
    /// The URL does not parse, or has no usable path segment.
    #[error("unparsable URL {0}")]
    Unparsable(String),
}

/// One rewrite rule: a cheap predicate plus the rewrite it triggers.
struct Rule {
    name: &'static str,
    matches: fn(&str) -> bool,
    rewrite: fn(&str) -> Result<String, ResolveError>,
}

/// Rule order is the policy: direct links pass through before any
/// redirector marker is considered, and quickmeme outranks imgur for URLs
/// that happen to contain both markers.
const RULES: [Rule; 3] = [
    Rule {
        name: "direct",
        matches: is_direct,
        rewrite: pass_through,
    },
    Rule {
        name: "quickmeme",
        matches: is_quickmeme,
        rewrite: rewrite_quickmeme,
    },
    Rule {
        name: "imgur",
        matches: is_imgur,
        rewrite: rewrite_imgur,
    },
];

fn is_direct(url: &str) -> bool {
    url.ends_with(".jpg") || url.ends_with(".png")
}

fn is_quickmeme(url: &str) -> bool {
    url.contains("qkme") || url.contains("quickmeme")
}

fn is_imgur(url: &str) -> bool {
    url.contains("imgur")
}

fn pass_through(url: &str) -> Result<String, ResolveError> {
    Ok(url.to_string())
}

fn rewrite_quickmeme(url: &str) -> Result<String, ResolveError> {
    Ok(format!("http://i.qkme.me/{}.jpg", image_key(url)?))
}

fn rewrite_imgur(url: &str) -> Result<String, ResolveError> {
    Ok(format!("http://i.imgur.com/{}.jpg", image_key(url)?))
}

/// Resolves a submission URL to a directly fetchable image URL.
///
/// The result ends in `.jpg` or `.png` by construction; nothing checks that
/// the target host actually serves it. A fetch-time 404 is the caller's
/// problem to skip.
pub fn resolve(url: &str) -> Result<String, ResolveError> {
    for rule in &RULES {
        if (rule.matches)(url) {
            let resolved = (rule.rewrite)(url)?;
            tracing::debug!(rule = rule.name, "{} resolved to {}", url, resolved);
            return Ok(resolved);
        }
    }
    Err(ResolveError::UnrecognizedHost(url.to_string()))
}
