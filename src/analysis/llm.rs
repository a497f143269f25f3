//! Structured-output model invocation.
//!
//! The model runtime may or may not honor a response schema, so the
//! crate abstracts the call behind [`StructuredGenerator`] with two
//! implementations: schema-constrained JSON output, and an example
//! object embedded in the prompt for free-text runtimes. Which one runs
//! is decided once at construction, never per call.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

use crate::analysis::prompt;
use crate::config::Config;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("model request failed: {0}")]
    Request(String),

    #[error("model endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model returned no text")]
    NoText,
}

#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Thin client for the Gemini `generateContent` REST call.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to build model HTTP client");
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate_content(
        &self,
        prompt: &str,
        generation_config: Option<serde_json::Value>,
    ) -> Result<String, GenerateError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        if let Some(config) = generation_config {
            body["generationConfig"] = config;
        }

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let message = prompt::truncate_chars(&message, 500).to_string();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        parsed.into_text().ok_or(GenerateError::NoText)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}

/// Schema-constrained JSON output.
pub struct SchemaGenerator {
    client: GeminiClient,
}

impl SchemaGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StructuredGenerator for SchemaGenerator {
    async fn generate(&self, prompt_text: &str) -> Result<String, GenerateError> {
        let config = json!({
            "responseMimeType": "application/json",
            "responseSchema": prompt::response_schema()
        });
        self.client.generate_content(prompt_text, Some(config)).await
    }
}

/// Free-text output with the expected JSON shown as an example in the
/// prompt; the repair pass carries the correctness burden here.
pub struct PromptExampleGenerator {
    client: GeminiClient,
}

impl PromptExampleGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StructuredGenerator for PromptExampleGenerator {
    async fn generate(&self, prompt_text: &str) -> Result<String, GenerateError> {
        let prompted = prompt::with_embedded_example(prompt_text);
        self.client.generate_content(&prompted, None).await
    }
}

/// Build the generator the configuration selects.
pub fn generator_from_config(config: &Config) -> Arc<dyn StructuredGenerator> {
    let client = GeminiClient::new(
        config.gemini_api_base(),
        config.gemini_model(),
        config.gemini_api_key(),
    );
    if config.schema_output() {
        Arc::new(SchemaGenerator::new(client))
    } else {
        Arc::new(PromptExampleGenerator::new(client))
    }
}
