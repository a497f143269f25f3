//! Top-headlines feed from Google News RSS.
//!
//! This is the cheap path: no model call, and best-effort by contract.
//! Every failure mode — network, HTTP status, malformed XML — collapses
//! to an empty list rather than an error.

use chrono::DateTime;
use regex::Regex;
use reqwest::Client;
use rss::Channel;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{instrument, warn};

pub const DEFAULT_MAX_ITEMS: usize = 12;

const FEED_TIMEOUT: Duration = Duration::from_secs(10);

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile tag regex"));

/// One headline, as served by `GET /news`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
}

#[derive(Debug, Clone)]
pub struct HeadlineFeed {
    http: Client,
    url: String,
}

impl HeadlineFeed {
    pub fn new(url: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(FEED_TIMEOUT)
            .timeout(FEED_TIMEOUT)
            .build()
            .expect("Failed to build feed HTTP client");
        Self {
            http,
            url: url.into(),
        }
    }

    /// Fetch and parse the feed. Never fails — degraded to `[]`.
    #[instrument(skip(self))]
    pub async fn top_headlines(&self, max_items: usize) -> Vec<NewsItem> {
        let response = match self.http.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "headline feed unreachable");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "headline feed returned error status");
            return Vec::new();
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read headline feed body");
                return Vec::new();
            }
        };

        parse_channel(&body, max_items)
    }
}

/// Parse RSS bytes into headline items. Split out from the HTTP call so
/// malformed-feed handling is testable without a server.
pub fn parse_channel(body: &[u8], max_items: usize) -> Vec<NewsItem> {
    let channel = match Channel::read_from(body) {
        Ok(channel) => channel,
        Err(e) => {
            warn!(error = %e, "failed to parse headline feed");
            return Vec::new();
        }
    };

    channel
        .items()
        .iter()
        .take(max_items)
        .map(|item| NewsItem {
            title: clean_html(item.title().unwrap_or_default()),
            link: item.link().unwrap_or_default().to_string(),
            summary: clean_html(item.description().unwrap_or_default()),
            published: reformat_date(item.pub_date().unwrap_or_default()),
        })
        .collect()
}

/// Unescape HTML entities and strip tag markup.
fn clean_html(text: &str) -> String {
    let unescaped = html_escape::decode_html_entities(text);
    TAG_REGEX.replace_all(&unescaped, "").trim().to_string()
}

/// RSS pubDate (RFC 2822) → `YYYY-MM-DD HH:MM`. Unparseable dates are
/// kept verbatim; the field is never dropped.
fn reformat_date(raw: &str) -> String {
    match DateTime::parse_from_rfc2822(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
