//! Blocking HTTP GET used to fetch image bytes.
//!
//! The synchronizer only depends on the [`Transfer`] trait, so tests can
//! substitute an in-memory implementation.

use anyhow::{Context, Result};
use std::time::Duration;

/// Status and full body of one GET. A non-2xx status is data, not an error:
/// the caller decides whether to skip the link.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Capability to fetch a URL's bytes. `Err` means the transfer itself
/// failed (DNS, connect, timeout); HTTP-level failures come back as a
/// [`FetchResponse`] with the status set.
pub trait Transfer {
    fn get(&self, url: &str) -> Result<FetchResponse>;
}

/// libcurl-backed [`Transfer`]. Follows redirects; the whole body is
/// buffered in memory (frame images are small).
#[derive(Debug, Clone)]
pub struct CurlTransfer {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlTransfer {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(120),
        }
    }
}

impl Transfer for CurlTransfer {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("GET request failed")?;
        }

        let status = easy.response_code().context("no response code")?;
        Ok(FetchResponse { status, body })
    }
}
