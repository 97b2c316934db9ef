// src/services/metadata.rs
//! Bilingual YouTube Shorts title/description generation

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::AiServiceError;
use crate::gemini_client::{GenerateContentRequest, GenerativeModel, Part};
use crate::services::{parse_model_json, require_text};
use crate::types::{BilingualMeta, LocalizedMeta};

#[derive(Debug, Deserialize)]
struct RawMeta {
    english_title: Option<String>,
    english_description: Option<String>,
    hindi_title: Option<String>,
    hindi_description: Option<String>,
}

#[derive(Clone)]
pub struct MetadataRequester {
    model: Arc<dyn GenerativeModel>,
}

impl MetadataRequester {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, video_concept: &str) -> Result<BilingualMeta, AiServiceError> {
        let request = GenerateContentRequest::structured(
            vec![Part::text(metadata_instruction(video_concept))],
            metadata_schema(),
            None,
        );

        let text = self.model.generate_text(request).await?;
        let raw: RawMeta = parse_model_json(&text)?;

        Ok(BilingualMeta {
            en: LocalizedMeta {
                title: require_text(raw.english_title, "english_title")?,
                description: require_text(raw.english_description, "english_description")?,
            },
            hi: LocalizedMeta {
                title: require_text(raw.hindi_title, "hindi_title")?,
                description: require_text(raw.hindi_description, "hindi_description")?,
            },
        })
    }
}

fn metadata_instruction(video_concept: &str) -> String {
    format!(
        "Generate a catchy, viral YouTube Shorts title and a brief, engaging description (including relevant hashtags) for the following video concept. \
Provide versions in both English and Hindi. The video is intense, brutal, and cinematic.\n\n\
Video Concept: \"{}\"",
        video_concept
    )
}

fn metadata_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "english_title": {
                "type": "STRING",
                "description": "A catchy, viral YouTube Shorts title in English (max 60 characters)."
            },
            "english_description": {
                "type": "STRING",
                "description": "A brief, engaging YouTube Shorts description in English, including 3-5 relevant hashtags."
            },
            "hindi_title": {
                "type": "STRING",
                "description": "A catchy, viral YouTube Shorts title in Hindi (max 60 characters)."
            },
            "hindi_description": {
                "type": "STRING",
                "description": "A brief, engaging YouTube Shorts description in Hindi, including 3-5 relevant hashtags."
            }
        },
        "required": ["english_title", "english_description", "hindi_title", "hindi_description"]
    })
}
