//! Reddit listing client over the public JSON endpoints.
//!
//! Uses the curl crate (libcurl) for blocking GETs. Construction never
//! touches the network; [`RedditClient::login`] is the explicit,
//! optional authentication step.

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use super::parse::parse_listing;
use super::{ForumClient, Submission};

/// Public Reddit endpoint; tests point the client at a local fixture.
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Session cookie name returned by the login endpoint.
const SESSION_COOKIE: &str = "reddit_session";

/// Listing client for one Reddit-compatible host.
#[derive(Debug)]
pub struct RedditClient {
    base_url: String,
    user_agent: String,
    session_cookie: Option<String>,
}

impl RedditClient {
    /// Client for the public Reddit API.
    pub fn new(user_agent: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent)
    }

    /// Client for an arbitrary Reddit-compatible host (integration tests).
    pub fn with_base_url(base_url: &str, user_agent: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            session_cookie: None,
        }
    }

    /// Authenticates with the given credentials and keeps the session
    /// cookie for subsequent listing requests. The credentials themselves
    /// are passed through verbatim and never stored.
    pub fn login(&mut self, user: &str, passwd: &str) -> Result<()> {
        let url = format!("{}/api/login", self.base_url);
        let form: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("user", user)
            .append_pair("passwd", passwd)
            .append_pair("api_type", "json")
            .finish();

        let mut header_lines: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&url).context("invalid URL")?;
        easy.post(true)?;
        easy.post_fields_copy(form.as_bytes())?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(60))?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform().context("login request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("login returned HTTP {}", code);
        }

        let cookie = session_cookie_from_headers(&header_lines)
            .ok_or_else(|| anyhow::anyhow!("login did not return a session cookie"))?;
        tracing::debug!("authenticated as {}", user);
        self.session_cookie = Some(cookie);
        Ok(())
    }

    /// Performs one GET against the listing host with the client's user
    /// agent and (when logged in) session cookie.
    fn http_get(&self, url: &str) -> Result<(u32, Vec<u8>)> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(60))?;

        if let Some(cookie) = &self.session_cookie {
            let mut list = curl::easy::List::new();
            list.append(&format!("Cookie: {}", cookie))?;
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("listing request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        Ok((code, body))
    }

    fn listing(&self, board: &str, kind: &str, limit: u32) -> Result<Vec<Submission>> {
        let url = format!("{}/r/{}/{}.json?limit={}", self.base_url, board, kind, limit);
        let (status, body) = self.http_get(&url)?;
        if !(200..300).contains(&status) {
            anyhow::bail!("GET {} returned HTTP {}", url, status);
        }
        parse_listing(&body).with_context(|| format!("{} listing for r/{}", kind, board))
    }
}

impl ForumClient for RedditClient {
    fn top(&self, board: &str, limit: u32) -> Result<Vec<Submission>> {
        self.listing(board, "top", limit)
    }

    fn hot(&self, board: &str, limit: u32) -> Result<Vec<Submission>> {
        self.listing(board, "hot", limit)
    }
}

/// Finds the session cookie pair (`name=value`) in response header lines.
fn session_cookie_from_headers(lines: &[String]) -> Option<String> {
    for line in lines {
        let (name, value) = match line.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };
        if !name.trim().eq_ignore_ascii_case("set-cookie") {
            continue;
        }
        let pair = value.trim().split(';').next().unwrap_or("").trim();
        if pair.starts_with(SESSION_COOKIE) && pair.contains('=') {
            return Some(pair.to_string());
        }
    }
    None
}
