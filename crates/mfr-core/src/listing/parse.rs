//! Parse board listing JSON into submissions.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::Submission;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Value,
}

/// Parses a listing response body into submissions.
///
/// The envelope (`data.children[].data`) must be well-formed; individual
/// entries are only trusted as far as they carry both the outbound URL and
/// the adult flag. Entries missing either are skipped with a warning, not
/// treated as a crash.
pub(crate) fn parse_listing(body: &[u8]) -> Result<Vec<Submission>> {
    let listing: Listing = serde_json::from_slice(body).context("malformed listing JSON")?;

    let mut submissions = Vec::new();
    for child in listing.data.children {
        let url = child.data.get("url").and_then(Value::as_str);
        let over_18 = child.data.get("over_18").and_then(Value::as_bool);
        match (url, over_18) {
            (Some(url), Some(over_18)) => submissions.push(Submission {
                url: url.to_string(),
                over_18,
            }),
            _ => tracing::warn!("skipping listing entry without url or over_18"),
        }
    }
    Ok(submissions)
}
