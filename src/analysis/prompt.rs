//! Prompt and output-contract construction for the credibility model.
//!
//! The evidence block format produced by [`crate::evidence`] is assumed
//! verbatim by the prompt text here; the two modules form one contract.

use serde_json::{Value, json};

/// Input bounds keep the model context cost fixed per request.
pub const MAX_ARTICLE_CHARS: usize = 4000;
pub const MAX_EVIDENCE_CHARS: usize = 3000;

const MAX_HEADLINE_CHARS: usize = 100;
const DEFAULT_HEADLINE: &str = "News Analysis";

/// Truncate to at most `max` characters on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Derive a headline from the article when the model fails to provide
/// one: the first line, capped at 100 chars with an ellipsis.
pub fn fallback_headline(article: &str) -> String {
    let first_line = article.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return DEFAULT_HEADLINE.to_string();
    }
    if first_line.chars().count() > MAX_HEADLINE_CHARS {
        let mut capped: String = first_line.chars().take(MAX_HEADLINE_CHARS - 3).collect();
        capped.push_str("...");
        return capped;
    }
    first_line.to_string()
}

pub fn build_prompt(article: &str, evidence: &str) -> String {
    format!(
        r#"You are an expert AI News Analyst specializing in fact-checking, bias detection, and credibility assessment.

TASK: Analyze the following news content for credibility, factual accuracy, bias, and provide a comprehensive analysis.

IMPORTANT:
If the input claim is incorrect or misleading, explicitly state that it is false
and provide the correct verified information in the summary.
Do not only summarize — correct the misinformation.

--- INPUT TEXT / CLAIM ---
{article}

--- EXTERNAL NEWS EVIDENCE ---
{evidence}

--- ANALYSIS REQUIREMENTS ---
1. CREDIBILITY ASSESSMENT: Score from 0-100 based on:
   - Factual accuracy and verification against evidence
   - Source reliability and cross-referencing
   - Consistency with trusted sources (BBC, Reuters, AP, etc.)
   - Absence of manipulative language or disinformation patterns

2. FACTUAL ACCURACY: Rate as "High", "Medium", or "Low" based on:
   - How well claims match verified evidence
   - Presence of factual errors or unverified claims

3. BIAS RATING: Determine as "Left", "Right", "Neutral", or "Mixed" by analyzing:
   - Political framing and language
   - Selective presentation of facts
   - Emotional manipulation techniques

4. ANALYSIS SUMMARY:
Provide a 2-3 sentence analysis.
If the claim is false or misleading, clearly state the correction with verified facts.

5. TAGS: Identify 3 relevant topic categories (e.g., Technology, Finance, Politics, Science, Health, Sports, Entertainment)

6. CROSS-REFERENCES: Extract up to 3 trusted sources mentioned in the evidence with their reliability indicators.

7. MULTILINGUAL OUTPUT:
   Provide the same summary translated into:
   - Hindi
   - Marathi

Be thorough, objective, and base your assessment on the evidence provided."#
    )
}

/// JSON schema for schema-constrained model output. Field names, types
/// and enums match [`crate::analysis::model::AnalysisResult`] exactly.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "trustScore": {
                "type": "integer",
                "description": "Credibility score from 0-100",
                "minimum": 0,
                "maximum": 100
            },
            "factualAccuracy": {
                "type": "string",
                "enum": ["High", "Medium", "Low"],
                "description": "Level of factual accuracy"
            },
            "biasRating": {
                "type": "string",
                "enum": ["Left", "Right", "Neutral", "Mixed"],
                "description": "Political bias assessment"
            },
            "headline": {
                "type": "string",
                "description": "A concise headline summarizing the analyzed content"
            },
            "summary": {
                "type": "string",
                "description": "A 2-3 sentence analysis of credibility, factual accuracy, bias, and key findings"
            },
            "summary_hi": {
                "type": "string",
                "description": "Hindi translation of the summary"
            },
            "summary_mr": {
                "type": "string",
                "description": "Marathi translation of the summary"
            },
            "tags": {
                "type": "array",
                "items": {"type": "string"},
                "minItems": 3,
                "maxItems": 3,
                "description": "Exactly 3 relevant topic tags"
            },
            "crossReferences": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "source": {"type": "string"},
                        "sourceInitials": {"type": "string"},
                        "timeAgo": {"type": "string"},
                        "trustColor": {
                            "type": "string",
                            "enum": ["primary", "yellow", "red", "gray"]
                        }
                    }
                },
                "maxItems": 3
            }
        },
        "required": ["trustScore", "factualAccuracy", "biasRating", "headline", "summary", "tags", "crossReferences"]
    })
}

/// Fallback output contract for runtimes without schema support: the
/// expected shape is shown as an example object in the prompt itself.
pub fn with_embedded_example(prompt: &str) -> String {
    let example = json!({
        "trustScore": 85,
        "factualAccuracy": "High",
        "biasRating": "Neutral",
        "headline": "Example Headline",
        "summary": "Example summary",
        "summary_hi": "Example summary in Hindi",
        "summary_mr": "Example summary in Marathi",
        "tags": ["Technology", "Finance", "Politics"],
        "crossReferences": [
            {"source": "Reuters", "sourceInitials": "RT", "timeAgo": "2 hours ago", "trustColor": "primary"}
        ]
    });

    format!(
        "{prompt}\n\nIMPORTANT: Respond ONLY with valid JSON matching this exact structure:\n{}\n\nDo not include any text before or after the JSON.",
        serde_json::to_string_pretty(&example).expect("example JSON serializes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ab", 4), "ab");
        // Multi-byte chars must not be split
        assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語");
    }

    #[test]
    fn fallback_headline_uses_first_line() {
        assert_eq!(
            fallback_headline("Council passes budget\nMore detail here"),
            "Council passes budget"
        );
    }

    #[test]
    fn fallback_headline_caps_with_ellipsis() {
        let long_line = "x".repeat(150);
        let headline = fallback_headline(&long_line);
        assert_eq!(headline.chars().count(), 100);
        assert!(headline.ends_with("..."));
    }

    #[test]
    fn fallback_headline_default_for_empty() {
        assert_eq!(fallback_headline(""), "News Analysis");
        assert_eq!(fallback_headline("\n\n"), "News Analysis");
    }

    #[test]
    fn prompt_embeds_article_and_evidence() {
        let prompt = build_prompt("User Claim: the sky is green", "SOURCE 1: Reuters (2026-01-01)");
        assert!(prompt.contains("User Claim: the sky is green"));
        assert!(prompt.contains("SOURCE 1: Reuters"));
        assert!(prompt.contains("--- EXTERNAL NEWS EVIDENCE ---"));
    }

    #[test]
    fn schema_enums_match_result_contract() {
        let schema = response_schema();
        assert_eq!(
            schema["properties"]["factualAccuracy"]["enum"],
            json!(["High", "Medium", "Low"])
        );
        assert_eq!(
            schema["properties"]["biasRating"]["enum"],
            json!(["Left", "Right", "Neutral", "Mixed"])
        );
        assert_eq!(schema["properties"]["tags"]["maxItems"], 3);
    }

    #[test]
    fn embedded_example_parses_as_raw_analysis() {
        let prompted = with_embedded_example("PROMPT");
        let start = prompted.find('{').unwrap();
        let end = prompted.rfind('}').unwrap();
        let raw: crate::analysis::model::RawAnalysis =
            serde_json::from_str(&prompted[start..=end]).unwrap();
        assert_eq!(raw.trust_score, 85);
    }
}
