use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::models::Content;

/// Errors that can occur when calling the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("AI service is not configured")]
    Unavailable,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Generation parameters forwarded to the model
///
/// Serialized as the `generationConfig` block of a generateContent call.
/// Every endpoint uses its own combination; absent fields fall back to the
/// model defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GenerationConfig {
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }

    pub fn json_output() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            ..Self::default()
        }
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Gemini API client
///
/// Thin pass-through over the generateContent REST endpoint. No retry,
/// backoff or caching: an upstream failure surfaces directly as a
/// `GeminiError` and the route maps it to a server error.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Generate text from a single prompt
    pub async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, GeminiError> {
        let contents = vec![json!({
            "role": "user",
            "parts": [{"text": prompt}],
        })];

        self.generate_content(contents, None, config).await
    }

    /// Generate text from a multi-turn conversation
    ///
    /// The prior history is forwarded as-is and the new user message is
    /// appended as the final turn.
    pub async fn chat(
        &self,
        system_instruction: &str,
        history: &[Content],
        user_message: &str,
        config: GenerationConfig,
    ) -> Result<String, GeminiError> {
        let mut contents: Vec<Value> = history
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role,
                    "parts": turn.parts.iter().map(|p| json!({"text": p.text})).collect::<Vec<_>>(),
                })
            })
            .collect();

        contents.push(json!({
            "role": "user",
            "parts": [{"text": user_message}],
        }));

        self.generate_content(contents, Some(system_instruction), config)
            .await
    }

    async fn generate_content(
        &self,
        contents: Vec<Value>,
        system_instruction: Option<&str>,
        config: GenerationConfig,
    ) -> Result<String, GeminiError> {
        if !self.is_configured() {
            return Err(GeminiError::Unavailable);
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            urlencoding::encode(&self.api_key),
        );

        let mut payload = json!({
            "contents": contents,
            "generationConfig": config,
        });

        if let Some(instruction) = system_instruction {
            payload["systemInstruction"] = json!({
                "parts": [{"text": instruction}],
            });
        }

        tracing::debug!("Calling Gemini model {}", self.model);

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Gemini call failed: {} - {}", status, body);
            return Err(GeminiError::ApiError(format!(
                "Gemini returned {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        extract_candidate_text(&json)
    }
}

/// Pull the first candidate's text out of a generateContent response
fn extract_candidate_text(response: &Value) -> Result<String, GeminiError> {
    let text = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .and_then(|p| p.first())
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| GeminiError::InvalidResponse("Missing candidate text".into()))?;

    Ok(text.to_string())
}
