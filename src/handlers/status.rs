// src/handlers/status.rs
use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

/// GET /api/status - Service health and configuration summary
pub async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let snapshot = state.orchestrator.snapshot();
    let uptime_secs = (chrono::Utc::now() - state.started_at).num_seconds();

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime_secs,
        "services": {
            "gemini_model": state.gemini_model,
        },
        "studio": {
            "mode": snapshot.mode,
            "in_flight": snapshot.in_flight,
            "prompt_count": snapshot.prompts.len(),
            "has_metadata": snapshot.meta.is_some(),
        },
        "endpoints": {
            "status": "/api/status",
            "studio": "/api/studio",
            "export": "/api/studio/export"
        }
    }))
}
