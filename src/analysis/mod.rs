//! Claim verification: input classification, evidence-grounded model
//! analysis, and the per-request orchestration shared by the HTTP API
//! and the CLI.

pub mod input;
pub mod llm;
pub mod model;
pub mod prompt;
pub mod repair;

pub use input::InputKind;
pub use llm::{GenerateError, StructuredGenerator, generator_from_config};
pub use model::{AnalysisResult, BiasRating, CrossReference, FactualAccuracy, TrustColor};

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::analysis::model::RawAnalysis;
use crate::evidence::{self, SearchProvider};
use crate::extractor::{self, ExtractError};

/// What the analyzer receives when nothing could be retrieved; the raw
/// search sentinel never reaches the prompt.
pub const NO_EVIDENCE_PLACEHOLDER: &str = "No reliable external evidence was found.";

/// URL-mode evidence queries use this much of the extracted text.
const SEARCH_QUERY_CHARS: usize = 120;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("model generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("failed to parse model response as JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runs the model call and owns the response contract.
pub struct Analyzer {
    generator: Arc<dyn StructuredGenerator>,
}

impl Analyzer {
    pub fn new(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self { generator }
    }

    /// Score `article_text` against `evidence_text`. The returned value
    /// always satisfies the canonical shape; the repair pass enforces
    /// it regardless of what the model emitted.
    #[instrument(skip_all)]
    pub async fn analyze(
        &self,
        article_text: &str,
        evidence_text: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let article = prompt::truncate_chars(article_text, prompt::MAX_ARTICLE_CHARS);
        let evidence = prompt::truncate_chars(evidence_text, prompt::MAX_EVIDENCE_CHARS);
        let fallback_headline = prompt::fallback_headline(article);

        let composed = prompt::build_prompt(article, evidence);
        let raw_text = self.generator.generate(&composed).await?;

        let cleaned = repair::strip_code_fences(&raw_text);
        let raw: RawAnalysis = serde_json::from_str(cleaned)?;

        let result = repair::repair(raw, &fallback_headline);
        info!(
            trust_score = result.trust_score,
            accuracy = ?result.factual_accuracy,
            bias = ?result.bias_rating,
            "analysis complete"
        );
        Ok(result)
    }
}

/// A completed credibility assessment for one request.
#[derive(Debug, Clone)]
pub struct Report {
    pub input: String,
    pub analysis: AnalysisResult,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Empty input")]
    EmptyInput,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Run one full assessment: classify the input, scrape if it is a URL,
/// gather evidence, and invoke the analyzer. Strictly sequential and
/// terminal on first error; an extraction failure means no search and
/// no model call.
pub async fn assess(
    search: &dyn SearchProvider,
    analyzer: &Analyzer,
    raw_input: &str,
) -> Result<Report, RequestError> {
    let input = raw_input.trim();
    if input.is_empty() {
        return Err(RequestError::EmptyInput);
    }

    let (article_text, search_query) = match input::classify(input) {
        InputKind::Url(url) => {
            info!(mode = "url", "classifying input");
            let article = extractor::scrape(&url).await?;
            let query = prompt::truncate_chars(&article.text, SEARCH_QUERY_CHARS).to_string();
            (article.text, query)
        }
        InputKind::Claim(claim) => {
            info!(mode = "claim", "classifying input");
            (format!("User Claim: {claim}"), claim)
        }
    };

    let evidence = evidence::gather(search, &search_query, evidence::DEFAULT_MAX_RESULTS).await;
    let evidence = if evidence.starts_with(evidence::NO_EVIDENCE) {
        warn!("no external evidence found");
        NO_EVIDENCE_PLACEHOLDER.to_string()
    } else {
        evidence
    };

    let analysis = analyzer.analyze(&article_text, &evidence).await?;

    Ok(Report {
        input: input.to_string(),
        analysis,
    })
}
