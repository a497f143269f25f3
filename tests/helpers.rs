use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use veritas::{
    analysis::{Analyzer, GenerateError, StructuredGenerator},
    api,
    app_state::AppState,
    evidence::{NewsSearchHit, SearchProvider},
    feed::HeadlineFeed,
};

/// Search stub that replies with a fixed set of hits.
pub struct StaticSearch {
    pub hits: Vec<NewsSearchHit>,
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search_news(
        &self,
        _query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<NewsSearchHit>> {
        let mut hits = self.hits.clone();
        hits.truncate(max_results);
        Ok(hits)
    }
}

/// Search stub that fails the test if it is ever reached.
pub struct UnreachableSearch;

#[async_trait]
impl SearchProvider for UnreachableSearch {
    async fn search_news(
        &self,
        _query: &str,
        _max_results: usize,
    ) -> anyhow::Result<Vec<NewsSearchHit>> {
        panic!("search provider must not be called in this scenario");
    }
}

/// Generator stub replying with a canned body.
pub struct CannedGenerator {
    pub reply: String,
}

#[async_trait]
impl StructuredGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Ok(self.reply.clone())
    }
}

/// Generator stub that fails the test if it is ever reached.
pub struct UnreachableGenerator;

#[async_trait]
impl StructuredGenerator for UnreachableGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        panic!("model must not be called in this scenario");
    }
}

pub fn sample_hit() -> NewsSearchHit {
    NewsSearchHit {
        source: "Reuters".to_string(),
        date: "2026-08-01".to_string(),
        title: "Independent coverage of the story".to_string(),
        body: "Details corroborated by agency reporting.".to_string(),
        url: "https://news.example.com/coverage".to_string(),
    }
}

pub fn sample_analysis_json() -> String {
    serde_json::json!({
        "trustScore": 88,
        "factualAccuracy": "High",
        "biasRating": "Neutral",
        "headline": "Story holds up against agency reporting",
        "summary": "The reporting is consistent with wire-service coverage.",
        "tags": ["Politics", "Media"],
        "crossReferences": [
            {"source": "Reuters", "sourceInitials": "RT", "timeAgo": "2 hours ago", "trustColor": "primary"}
        ]
    })
    .to_string()
}

pub fn test_app(
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn StructuredGenerator>,
    feed_url: &str,
) -> Router {
    let state = AppState {
        analyzer: Arc::new(Analyzer::new(generator)),
        search,
        feed: Arc::new(HeadlineFeed::new(feed_url)),
    };
    api::router(state)
}
