// types.rs - Common data structures shared by the workflows
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level content strategy selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioMode {
    #[default]
    Celebration,
    Faceoff,
    Analyze,
}

impl ScenarioMode {
    /// Modes driven by the prompt templates (as opposed to image analysis)
    pub fn is_template_mode(self) -> bool {
        matches!(self, ScenarioMode::Celebration | ScenarioMode::Faceoff)
    }
}

impl fmt::Display for ScenarioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioMode::Celebration => "celebration",
            ScenarioMode::Faceoff => "faceoff",
            ScenarioMode::Analyze => "analyze",
        };
        f.write_str(name)
    }
}

/// The entities filling a prompt template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSelection {
    pub primary: String,
    /// Only used in face-off mode
    pub secondary: String,
    pub backdrop: String,
}

/// Which field of the selection a user edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionField {
    Primary,
    Secondary,
    Backdrop,
}

/// Image/video prompts produced by one workflow run, index-aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptBundle {
    pub image_prompts: Vec<String>,
    pub video_prompts: Vec<String>,
}

impl PromptBundle {
    pub fn single(image_prompt: String, video_prompt: String) -> Self {
        Self {
            image_prompts: vec![image_prompt],
            video_prompts: vec![video_prompt],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_prompts.is_empty() && self.video_prompts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.image_prompts.len()
    }

    pub fn clear(&mut self) {
        self.image_prompts.clear();
        self.video_prompts.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedMeta {
    pub title: String,
    pub description: String,
}

/// English/Hindi title and description pairs for a video concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualMeta {
    pub en: LocalizedMeta,
    pub hi: LocalizedMeta,
}

impl BilingualMeta {
    /// Text placed on the clipboard by "copy all" on the metadata card
    pub fn combined_text(&self) -> String {
        format!(
            "--- ENGLISH ---\nTitle: {}\nDescription: {}\n\n--- HINDI ---\nTitle: {}\nDescription: {}",
            self.en.title, self.en.description, self.hi.title, self.hi.description
        )
    }
}

/// The workflow currently running; at most one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InFlight {
    #[default]
    Idle,
    Generating,
    Randomizing,
    Analyzing,
}

impl InFlight {
    pub fn is_busy(self) -> bool {
        self != InFlight::Idle
    }
}
