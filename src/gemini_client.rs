use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AiServiceError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Anything that can turn a generateContent request into response text.
/// Implemented by [`GeminiClient`]; tests substitute scripted models.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_text(&self, request: GenerateContentRequest) -> Result<String, AiServiceError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request asking for JSON that matches `schema`
    pub fn structured(parts: Vec<Part>, schema: Value, temperature: Option<f32>) -> Self {
        Self {
            contents: vec![Content {
                parts,
                role: Some("user".to_string()),
            }],
            generation_config: Some(GenerationConfig {
                temperature,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String, // base64 encoded data
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u32,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }

    pub fn with_endpoint(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiServiceError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        tracing::debug!(
            model = %self.model,
            contents = request.contents.len(),
            structured = request
                .generation_config
                .as_ref()
                .map_or(false, |c| c.response_schema.is_some()),
            "sending Gemini request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(AiServiceError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        tracing::debug!("Gemini API response (truncated): {}...", truncate(&response_text, 500));

        let result: GenerateContentResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            AiServiceError::Parse(e)
        })?;

        if let Some(usage) = &result.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                completion_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Gemini token usage"
            );
        }

        Ok(result)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_text(&self, request: GenerateContentRequest) -> Result<String, AiServiceError> {
        let response = self.generate_content(&request).await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(AiServiceError::Blocked(reason));
        }

        response.first_text().ok_or(AiServiceError::EmptyResponse)
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
