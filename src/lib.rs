// lib.rs - Prompt studio library: prompt generation, Gemini requesters, and the HTTP surface
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod gemini_client;
pub mod handlers;
pub mod middleware;
pub mod options;
pub mod orchestrator;
pub mod services;
pub mod templates;
pub mod thumbnail;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

use axum::{Extension, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::StudioConfig;
pub use error::{AiServiceError, ConfigError, SelectionError, StudioError};
pub use orchestrator::{ActionOutcome, IgnoreReason, Orchestrator, StudioState};
pub use types::*;

/// Shared state handed to every handler
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub gemini_model: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, gemini_model: impl Into<String>) -> Self {
        Self {
            orchestrator,
            gemini_model: gemini_model.into(),
            started_at: Utc::now(),
        }
    }
}

/// Builds the application router with all routes and shared state
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::studio::studio_routes())
        .route("/api/status", axum::routing::get(handlers::status::api_status))
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
