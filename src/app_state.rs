use std::sync::Arc;

use crate::analysis::{Analyzer, generator_from_config};
use crate::config::Config;
use crate::evidence::{DuckDuckGoNews, SearchProvider};
use crate::feed::HeadlineFeed;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub search: Arc<dyn SearchProvider>,
    pub feed: Arc<HeadlineFeed>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            analyzer: Arc::new(Analyzer::new(generator_from_config(config))),
            search: Arc::new(DuckDuckGoNews::new(config.search_api_base())),
            feed: Arc::new(HeadlineFeed::new(config.news_feed_url())),
        }
    }
}
