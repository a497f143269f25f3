use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::evidence::{NewsSearchHit, SearchProvider};

const REGION_GLOBAL: &str = "wt-wt";
const SAFESEARCH_MODERATE: &str = "-1";

/// DuckDuckGo news-search client (the `news.js` JSON endpoint).
#[derive(Debug, Clone)]
pub struct DuckDuckGoNews {
    http: Client,
    base_url: String,
    region: String,
}

impl DuckDuckGoNews {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(20))
            .build()
            .expect("Failed to build search HTTP client");
        Self {
            http,
            base_url: base_url.into(),
            region: REGION_GLOBAL.to_string(),
        }
    }
}

/// Wire shape of a `news.js` response. Fields the provider may drop are
/// optional and defaulted during conversion.
#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<NewsResult>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    date: Option<i64>,
    source: Option<String>,
    title: Option<String>,
    excerpt: Option<String>,
    url: Option<String>,
}

impl From<NewsResult> for NewsSearchHit {
    fn from(r: NewsResult) -> Self {
        let date = r
            .date
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        NewsSearchHit {
            source: r.source.unwrap_or_else(|| "Unknown".to_string()),
            date,
            title: r.title.unwrap_or_default(),
            body: r.excerpt.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoNews {
    #[instrument(skip(self), fields(query = %query))]
    async fn search_news(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<NewsSearchHit>> {
        let url = format!("{}/news.js", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("o", "json"),
                ("q", query),
                ("kl", self.region.as_str()),
                ("p", SAFESEARCH_MODERATE),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: NewsResponse = response.json().await?;

        let mut hits: Vec<NewsSearchHit> =
            parsed.results.into_iter().map(NewsSearchHit::from).collect();
        hits.truncate(max_results);
        Ok(hits)
    }
}
