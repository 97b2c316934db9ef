// src/services/mod.rs
pub mod image_analysis;
pub mod metadata;
pub mod randomizer;

pub use image_analysis::{ImageAnalysisRequester, Storyline};
pub use metadata::MetadataRequester;
pub use randomizer::{RandomizationRequester, Suggestion};

use serde::de::DeserializeOwned;

use crate::error::AiServiceError;
use crate::utils::strip_code_fence;

/// Parse model output as JSON after removing an optional fenced code block
pub(crate) fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, AiServiceError> {
    let json = strip_code_fence(text);
    serde_json::from_str(json).map_err(|e| {
        tracing::warn!("Model returned unparseable JSON: {}", e);
        AiServiceError::Parse(e)
    })
}

/// A required string field must be present and non-blank
pub(crate) fn require_text(value: Option<String>, field: &'static str) -> Result<String, AiServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AiServiceError::MissingField(field)),
    }
}
