// src/services/image_analysis.rs
//! Turns a thumbnail into a three-scene storyline of image/video prompts

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::AiServiceError;
use crate::gemini_client::{GenerateContentRequest, GenerativeModel, InlineData, Part};
use crate::services::{parse_model_json, require_text};
use crate::thumbnail::ThumbnailImage;
use crate::types::PromptBundle;

pub const SCENE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storyline {
    pub prompts: PromptBundle,
    pub video_concept: String,
}

#[derive(Debug, Deserialize)]
struct RawScene {
    image_prompt: Option<String>,
    video_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStoryline {
    scene1: Option<RawScene>,
    scene2: Option<RawScene>,
    scene3: Option<RawScene>,
    video_concept: Option<String>,
}

#[derive(Clone)]
pub struct ImageAnalysisRequester {
    model: Arc<dyn GenerativeModel>,
}

impl ImageAnalysisRequester {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// All three scenes and the concept must parse, otherwise the whole call fails.
    pub async fn analyze(&self, image: &ThumbnailImage) -> Result<Storyline, AiServiceError> {
        let request = GenerateContentRequest::structured(
            vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.to_string(),
                        data: image.base64.clone(),
                    },
                },
                Part::text(ANALYSIS_INSTRUCTION),
            ],
            storyline_schema(),
            None,
        );

        let text = self.model.generate_text(request).await?;
        let raw: RawStoryline = parse_model_json(&text)?;

        let scenes = [
            (raw.scene1, "scene1"),
            (raw.scene2, "scene2"),
            (raw.scene3, "scene3"),
        ];

        let mut prompts = PromptBundle::default();
        for (scene, name) in scenes {
            let scene = scene.ok_or(AiServiceError::MissingField(name))?;
            prompts
                .image_prompts
                .push(require_text(scene.image_prompt, "image_prompt")?);
            prompts
                .video_prompts
                .push(require_text(scene.video_prompt, "video_prompt")?);
        }

        Ok(Storyline {
            prompts,
            video_concept: require_text(raw.video_concept, "video_concept")?,
        })
    }
}

const ANALYSIS_INSTRUCTION: &str = "Analyze the provided image in detail and use it as the opening of a short, three-scene storyline for a YouTube Short.
For each scene, create two distinct creative prompts:
1.  **Image Prompt:** A detailed, descriptive prompt for an AI image generator to create an ultra-realistic, photorealistic still of the scene. Stay faithful to the subjects and setting of the provided image but aim for a more cinematic and high-fidelity result. Include specifics on lighting (e.g., natural, harsh, soft), composition (e.g., wide-angle, close-up), and fine details to achieve a documentary-style, 8K resolution look. The prompt should end with \"ultra real photo\".
2.  **Video Prompt:** A dynamic prompt for an AI video generator that animates the scene. Include camera movement, action, and atmosphere.
The scenes must follow each other in time: scene 1 sets up, scene 2 escalates, scene 3 resolves.
Finally, summarise the whole storyline in one or two sentences as the video concept.
Return the result as a JSON object.";

fn scene_schema(ordinal: &str) -> Value {
    json!({
        "type": "OBJECT",
        "description": format!("The {} scene of the storyline.", ordinal),
        "properties": {
            "image_prompt": { "type": "STRING", "description": "The detailed prompt for AI image generation." },
            "video_prompt": { "type": "STRING", "description": "The dynamic prompt for AI video generation." }
        },
        "required": ["image_prompt", "video_prompt"]
    })
}

fn storyline_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scene1": scene_schema("first"),
            "scene2": scene_schema("second"),
            "scene3": scene_schema("third"),
            "video_concept": {
                "type": "STRING",
                "description": "A one or two sentence summary of the complete storyline."
            }
        },
        "required": ["scene1", "scene2", "scene3", "video_concept"]
    })
}
