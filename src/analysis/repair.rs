//! The repair pass: coerce whatever the model returned into the exact
//! canonical result shape. The schema declaration alone is not trusted
//! to guarantee this — degraded responses and the prompt-embedded
//! fallback mode both land here.

use crate::analysis::model::{AnalysisResult, RawAnalysis};

pub const FILLER_TAG: &str = "General";
const REQUIRED_TAGS: usize = 3;
const MAX_CROSS_REFERENCES: usize = 3;

/// Strip markdown code-fence wrapping (```json / ```) the model
/// sometimes adds around its JSON.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Normalize a parsed model response into the canonical shape. Applied
/// to every response, and idempotent: repairing an already-canonical
/// value changes nothing.
pub fn repair(raw: RawAnalysis, fallback_headline: &str) -> AnalysisResult {
    let trust_score = raw.trust_score.clamp(0, 100) as u8;

    let headline = match raw.headline {
        Some(h) if !h.trim().is_empty() => h,
        _ => fallback_headline.to_string(),
    };

    let summary_hi = raw.summary_hi.unwrap_or_else(|| raw.summary.clone());
    let summary_mr = raw.summary_mr.unwrap_or_else(|| raw.summary.clone());

    let mut tags = raw.tags;
    tags.truncate(REQUIRED_TAGS);
    while tags.len() < REQUIRED_TAGS {
        tags.push(FILLER_TAG.to_string());
    }

    let mut cross_references = raw.cross_references;
    cross_references.truncate(MAX_CROSS_REFERENCES);

    AnalysisResult {
        trust_score,
        factual_accuracy: raw.factual_accuracy,
        bias_rating: raw.bias_rating,
        headline,
        summary: raw.summary,
        summary_hi,
        summary_mr,
        tags,
        cross_references,
    }
}
