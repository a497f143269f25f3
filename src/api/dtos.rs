use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::AnalysisResult;
use crate::feed::NewsItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// A URL to scrape or a free-text claim to verify.
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub status: String,
    pub input: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsFeedResponse {
    pub articles: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BiasRating, FactualAccuracy};

    #[test]
    fn analyze_response_flattens_analysis_fields() {
        let response = AnalyzeResponse {
            status: "success".to_string(),
            input: "claim".to_string(),
            analysis: AnalysisResult {
                trust_score: 42,
                factual_accuracy: FactualAccuracy::Medium,
                bias_rating: BiasRating::Mixed,
                headline: "H".to_string(),
                summary: "S".to_string(),
                summary_hi: "S".to_string(),
                summary_mr: "S".to_string(),
                tags: vec!["A".into(), "B".into(), "C".into()],
                cross_references: vec![],
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["trustScore"], 42);
        assert!(value.get("analysis").is_none());
    }
}
