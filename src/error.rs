// error.rs - Error kinds surfaced by the studio
use thiserror::Error;

/// Failures talking to the generative model or interpreting its output
#[derive(Error, Debug)]
pub enum AiServiceError {
    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Gemini blocked the prompt: {0}")]
    Blocked(String),
    #[error("Gemini returned no text")]
    EmptyResponse,
    #[error("Model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Model output is missing `{0}`")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch image directly and via proxy: {0}")]
    ProxyFailed(String),
}

/// Workflow failures. `Display` is the message shown to the user.
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Invalid YouTube Shorts URL. Please use a valid link.")]
    InvalidUrl,
    #[error("Could not fetch YouTube thumbnail. This might be a CORS issue. This feature works best when run in an environment without strict cross-origin restrictions.")]
    ThumbnailUnavailable(#[source] FetchError),
    #[error("Failed to generate YouTube metadata.")]
    Metadata(#[source] AiServiceError),
    #[error("Failed to get random suggestions from the AI. Please try again.")]
    Randomize(#[source] AiServiceError),
    #[error("Failed to analyze Shorts. Please try again.")]
    Analyze(#[source] AiServiceError),
}

/// Rejected user edits of the subject selection
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selection can not change while a request is in progress")]
    Busy,
    #[error("`{value}` is not a known {field} option")]
    UnknownOption { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or API_KEY) is not set")]
    MissingApiKey,
    #[error("Invalid BIND_ADDRESS `{0}`")]
    InvalidBindAddress(String),
}
