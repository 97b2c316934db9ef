// Test doubles shared by the unit tests
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::error::AiServiceError;
use crate::gemini_client::{GenerateContentRequest, GenerativeModel, Part};

/// Replays queued responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, AiServiceError>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for `gate` to be notified before answering
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, error: AiServiceError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All text parts of the n-th request, joined
    pub fn request_text(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index]
            .contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn request(&self, index: usize) -> GenerateContentRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_text(&self, request: GenerateContentRequest) -> Result<String, AiServiceError> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AiServiceError::EmptyResponse))
    }
}

pub const META_JSON: &str = r#"{
    "english_title": "Epic Jaguar Vs Caiman!!",
    "english_description": "Nature at its wildest. #shorts #wildlife #epic",
    "hindi_title": "जगुआर बनाम मगरमच्छ!",
    "hindi_description": "प्रकृति का सबसे जंगली रूप। #shorts #wildlife"
}"#;

pub const STORYLINE_JSON: &str = r#"```json
{
    "scene1": {"image_prompt": "scene one image", "video_prompt": "scene one video"},
    "scene2": {"image_prompt": "scene two image", "video_prompt": "scene two video"},
    "scene3": {"image_prompt": "scene three image", "video_prompt": "scene three video"},
    "video_concept": "A jaguar stalks a caiman along a jungle river"
}
```"#;
