use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FactualAccuracy {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BiasRating {
    Left,
    Right,
    Neutral,
    Mixed,
}

/// Reliability indicator colors as the frontend renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrustColor {
    Primary,
    Yellow,
    Red,
    #[default]
    Gray,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrossReference {
    pub source: String,
    #[serde(default)]
    pub source_initials: String,
    #[serde(default)]
    pub time_ago: String,
    #[serde(default)]
    pub trust_color: TrustColor,
}

/// The canonical analysis output. Every value returned to a caller
/// satisfies this shape exactly; the repair pass enforces it no matter
/// what the model produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub trust_score: u8,
    pub factual_accuracy: FactualAccuracy,
    pub bias_rating: BiasRating,
    pub headline: String,
    pub summary: String,
    #[serde(rename = "summary_hi")]
    pub summary_hi: String,
    #[serde(rename = "summary_mr")]
    pub summary_mr: String,
    pub tags: Vec<String>,
    pub cross_references: Vec<CrossReference>,
}

/// What the model actually returned, before repair. Core judgments are
/// required — a response without them is unusable — while everything
/// the repair pass can reconstruct is optional or defaulted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub trust_score: i64,
    pub factual_accuracy: FactualAccuracy,
    pub bias_rating: BiasRating,
    #[serde(default)]
    pub headline: Option<String>,
    pub summary: String,
    #[serde(rename = "summary_hi", default)]
    pub summary_hi: Option<String>,
    #[serde(rename = "summary_mr", default)]
    pub summary_mr: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub cross_references: Vec<CrossReference>,
}

/// Coerce `crossReferences` to a list: null or a non-array value means
/// no cross-references, and malformed entries are dropped rather than
/// failing the whole parse.
fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<CrossReference>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
