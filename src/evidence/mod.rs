//! External evidence gathering.
//!
//! Evidence is informational-only: this module never fails a request.
//! Empty results and provider failures both degrade to the
//! [`NO_EVIDENCE`] sentinel, which the orchestrator rewrites before the
//! analyzer sees it.

pub mod ddg;

pub use ddg::DuckDuckGoNews;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sentinel returned when no usable evidence could be retrieved.
pub const NO_EVIDENCE: &str = "NO_EVIDENCE_FOUND";

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Word count of the retry query when the full query returns nothing.
/// Long scraped-article prefixes tend to over-constrain the search.
const SHORT_QUERY_WORDS: usize = 8;

/// A single external news-search hit, in retrieval order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSearchHit {
    pub source: String,
    pub date: String,
    pub title: String,
    pub body: String,
    pub url: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_news(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<NewsSearchHit>>;
}

/// Retrieve and format corroborating evidence for a query.
///
/// One search call; if it returns nothing, one retry with the query
/// truncated to its first eight words. Double-empty yields the bare
/// sentinel; a provider failure yields the sentinel plus error detail.
pub async fn gather(provider: &dyn SearchProvider, query: &str, max_results: usize) -> String {
    let hits = match provider.search_news(query, max_results).await {
        Ok(hits) => hits,
        Err(e) => {
            warn!(error = %e, "news search provider failed");
            return format!("{NO_EVIDENCE} {e}");
        }
    };

    let hits = if hits.is_empty() {
        let short_query = query
            .split_whitespace()
            .take(SHORT_QUERY_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        match provider.search_news(&short_query, max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "news search provider failed on retry");
                return format!("{NO_EVIDENCE} {e}");
            }
        }
    } else {
        hits
    };

    if hits.is_empty() {
        return NO_EVIDENCE.to_string();
    }

    format_evidence(&hits)
}

/// Fixed per-hit block layout. This is part of the analyzer's prompt
/// contract, not cosmetic formatting.
pub fn format_evidence(hits: &[NewsSearchHit]) -> String {
    let blocks: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "SOURCE {}: {} ({})\nHEADLINE: {}\nSNIPPET: {}\nLINK: {}\n",
                i + 1,
                hit.source,
                hit.date,
                hit.title,
                hit.body,
                hit.url
            )
        })
        .collect();

    blocks.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn hit(source: &str, title: &str) -> NewsSearchHit {
        NewsSearchHit {
            source: source.to_string(),
            date: "2026-08-01".to_string(),
            title: title.to_string(),
            body: "snippet text".to_string(),
            url: "https://news.example.com/a".to_string(),
        }
    }

    #[tokio::test]
    async fn formats_hits_into_blocks() {
        let mut provider = MockSearchProvider::new();
        provider
            .expect_search_news()
            .times(1)
            .returning(|_, _| Ok(vec![hit("Reuters", "Vote passes"), hit("AP", "Vote recap")]));

        let evidence = gather(&provider, "city council vote", 10).await;
        assert!(evidence.starts_with("SOURCE 1: Reuters (2026-08-01)"));
        assert!(evidence.contains("\n\nSOURCE 2: AP"));
        assert!(evidence.contains("HEADLINE: Vote passes"));
        assert!(evidence.contains("LINK: https://news.example.com/a"));
        assert!(!evidence.ends_with('\n'));
    }

    #[tokio::test]
    async fn retries_with_shortened_query() {
        let long_query = "one two three four five six seven eight nine ten";
        let mut provider = MockSearchProvider::new();
        provider
            .expect_search_news()
            .with(eq(long_query), eq(10))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        provider
            .expect_search_news()
            .with(eq("one two three four five six seven eight"), eq(10))
            .times(1)
            .returning(|_, _| Ok(vec![hit("BBC", "Found it")]));

        let evidence = gather(&provider, long_query, 10).await;
        assert!(evidence.contains("BBC"));
    }

    #[tokio::test]
    async fn double_empty_yields_sentinel() {
        let mut provider = MockSearchProvider::new();
        provider
            .expect_search_news()
            .times(2)
            .returning(|_, _| Ok(vec![]));

        let evidence = gather(&provider, "no such story", 10).await;
        assert_eq!(evidence, NO_EVIDENCE);
    }

    #[tokio::test]
    async fn provider_failure_embeds_detail() {
        let mut provider = MockSearchProvider::new();
        provider
            .expect_search_news()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("connection reset")));

        let evidence = gather(&provider, "anything", 10).await;
        assert!(evidence.starts_with(NO_EVIDENCE));
        assert!(evidence.contains("connection reset"));
    }
}
