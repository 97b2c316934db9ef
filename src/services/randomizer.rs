// src/services/randomizer.rs
//! Asks the model for a fresh subject/backdrop combination

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::AiServiceError;
use crate::gemini_client::{GenerateContentRequest, GenerativeModel, Part};
use crate::services::{parse_model_json, require_text};
use crate::types::ScenarioMode;

const RANDOMIZE_TEMPERATURE: f32 = 1.0;

/// Values suggested by the model. `secondary` is empty outside face-off mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub primary: String,
    pub secondary: String,
    pub backdrop: String,
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    animal: Option<String>,
    animal1: Option<String>,
    animal2: Option<String>,
    background: Option<String>,
}

#[derive(Clone)]
pub struct RandomizationRequester {
    model: Arc<dyn GenerativeModel>,
}

impl RandomizationRequester {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Expects a template mode; anything other than faceoff gets the celebration request.
    pub async fn suggest(&self, mode: ScenarioMode) -> Result<Suggestion, AiServiceError> {
        let faceoff = mode == ScenarioMode::Faceoff;
        let (instruction, schema) = if faceoff {
            (FACEOFF_INSTRUCTION, faceoff_schema())
        } else {
            (CELEBRATION_INSTRUCTION, celebration_schema())
        };

        let request = GenerateContentRequest::structured(
            vec![Part::text(instruction)],
            schema,
            Some(RANDOMIZE_TEMPERATURE),
        );

        let text = self.model.generate_text(request).await?;
        let raw: RawSuggestion = parse_model_json(&text)?;

        let suggestion = if faceoff {
            Suggestion {
                primary: require_text(raw.animal1.or(raw.animal), "animal1")?,
                secondary: require_text(raw.animal2, "animal2")?,
                backdrop: require_text(raw.background, "background")?,
            }
        } else {
            Suggestion {
                primary: require_text(raw.animal.or(raw.animal1), "animal")?,
                secondary: String::new(),
                backdrop: require_text(raw.background, "background")?,
            }
        };

        tracing::info!(
            mode = %mode,
            primary = %suggestion.primary,
            secondary = %suggestion.secondary,
            backdrop = %suggestion.backdrop,
            "received randomized suggestion"
        );

        Ok(suggestion)
    }
}

const CELEBRATION_INSTRUCTION: &str = "Generate a pair of a real, large, and visually impressive wild animal, and a fitting natural environment for it. \
Avoid common choices like lions, tigers, or bears. Be specific and creative.";

const FACEOFF_INSTRUCTION: &str = "Generate a pair of two different, large, and visually impressive wild animals that would make for an epic confrontation, \
and a fitting natural environment for their battle. Avoid common choices. Be specific and creative.";

const ANIMAL_DESCRIPTION: &str =
    "A real, large, and visually impressive wild animal. Be specific, for example \"Goliath Heron\" or \"Bactrian Camel\".";

fn celebration_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "animal": { "type": "STRING", "description": ANIMAL_DESCRIPTION },
            "background": {
                "type": "STRING",
                "description": "A visually stunning and fitting natural environment for the animal, like \"Salt Flats\" or \"Boreal Forest\"."
            }
        },
        "required": ["animal", "background"]
    })
}

fn faceoff_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "animal1": { "type": "STRING", "description": ANIMAL_DESCRIPTION },
            "animal2": {
                "type": "STRING",
                "description": "A second, different real, large, and visually impressive wild animal that would be a good opponent for the first animal. Be specific and creative."
            },
            "background": {
                "type": "STRING",
                "description": "A visually stunning and fitting natural environment for the two animals to fight in, like \"Volcanic Plains\" or \"Flooded Mangrove Forest\"."
            }
        },
        "required": ["animal1", "animal2", "background"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedModel;

    #[tokio::test]
    async fn test_celebration_suggestion() {
        let model = Arc::new(
            ScriptedModel::new().reply(r#"{"animal": "Goliath Heron", "background": "Salt Flats"}"#),
        );
        let requester = RandomizationRequester::new(model.clone());

        let suggestion = requester.suggest(ScenarioMode::Celebration).await.unwrap();
        assert_eq!(
            suggestion,
            Suggestion {
                primary: "Goliath Heron".into(),
                secondary: String::new(),
                backdrop: "Salt Flats".into(),
            }
        );

        let request = model.request(0);
        let config = request.generation_config.unwrap();
        assert_eq!(config.temperature, Some(1.0));
        assert!(config.response_schema.unwrap()["properties"].get("animal").is_some());
        assert!(model.request_text(0).contains("Avoid common choices like lions"));
    }

    #[tokio::test]
    async fn test_faceoff_suggestion() {
        let reply = "```json\n{\"animal1\": \"Jaguar\", \"animal2\": \"Black Caiman\", \"background\": \"Flooded Mangrove Forest\"}\n```";
        let requester = RandomizationRequester::new(Arc::new(ScriptedModel::new().reply(reply)));

        let suggestion = requester.suggest(ScenarioMode::Faceoff).await.unwrap();
        assert_eq!(suggestion.primary, "Jaguar");
        assert_eq!(suggestion.secondary, "Black Caiman");
        assert_eq!(suggestion.backdrop, "Flooded Mangrove Forest");
    }

    #[tokio::test]
    async fn test_empty_value_is_rejected() {
        let reply = r#"{"animal1": "Jaguar", "animal2": "  ", "background": "Swamp"}"#;
        let requester = RandomizationRequester::new(Arc::new(ScriptedModel::new().reply(reply)));
        let err = requester.suggest(ScenarioMode::Faceoff).await.unwrap_err();
        assert!(matches!(err, AiServiceError::MissingField("animal2")));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let requester = RandomizationRequester::new(Arc::new(
            ScriptedModel::new().fail(AiServiceError::Api { status: 503, body: "overloaded".into() }),
        ));
        let err = requester.suggest(ScenarioMode::Celebration).await.unwrap_err();
        assert!(matches!(err, AiServiceError::Api { status: 503, .. }));
    }
}
