// src/handlers/studio.rs
//! Studio endpoints - state, user edits, workflows, export and copy

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

use crate::clipboard::CopyTarget;
use crate::error::SelectionError;
use crate::orchestrator::{ActionOutcome, Orchestrator, StudioState};
use crate::types::{ScenarioMode, SelectionField};
use crate::AppState;

#[derive(Serialize)]
pub struct StateResponse {
    pub state: StudioState,
    pub copied: Vec<CopyTarget>,
}

#[derive(Serialize)]
pub struct ActionResponse {
    #[serde(flatten)]
    pub outcome: ActionOutcome,
    pub state: StudioState,
}

#[derive(Deserialize)]
pub struct ModeRequest {
    pub mode: ScenarioMode,
}

#[derive(Deserialize)]
pub struct SelectionRequest {
    pub field: SelectionField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct ShortsUrlRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct CopyResponse {
    pub target: CopyTarget,
    pub text: String,
}

pub fn studio_routes() -> Router {
    Router::new()
        .route("/api/studio", get(get_state))
        .route("/api/studio/mode", put(set_mode))
        .route("/api/studio/selection", put(set_selection))
        .route("/api/studio/shorts-url", put(set_shorts_url))
        .route("/api/studio/generate", post(generate))
        .route("/api/studio/randomize", post(randomize))
        .route("/api/studio/analyze", post(analyze))
        .route("/api/studio/export", get(export))
        .route("/api/studio/copy", post(copy))
}

fn state_response(orchestrator: &Orchestrator) -> Json<StateResponse> {
    Json(StateResponse {
        state: orchestrator.snapshot(),
        copied: orchestrator.copies().acknowledged(),
    })
}

/// GET /api/studio - Current state snapshot
async fn get_state(Extension(app): Extension<Arc<AppState>>) -> impl IntoResponse {
    state_response(&app.orchestrator)
}

/// PUT /api/studio/mode - Switch tab
async fn set_mode(
    Extension(app): Extension<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> impl IntoResponse {
    app.orchestrator.set_mode(request.mode);
    state_response(&app.orchestrator)
}

/// PUT /api/studio/selection - Pick a subject or backdrop from the known options
async fn set_selection(
    Extension(app): Extension<Arc<AppState>>,
    Json(request): Json<SelectionRequest>,
) -> Response {
    match app.orchestrator.select(request.field, &request.value) {
        Ok(()) => state_response(&app.orchestrator).into_response(),
        Err(e @ SelectionError::Busy) => (StatusCode::CONFLICT, e.to_string()).into_response(),
        Err(e @ SelectionError::UnknownOption { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
    }
}

/// PUT /api/studio/shorts-url - Set the URL analyzed in analyze mode
async fn set_shorts_url(
    Extension(app): Extension<Arc<AppState>>,
    Json(request): Json<ShortsUrlRequest>,
) -> impl IntoResponse {
    app.orchestrator.set_shorts_url(&request.url);
    state_response(&app.orchestrator)
}

/// POST /api/studio/generate
async fn generate(Extension(app): Extension<Arc<AppState>>) -> Response {
    run_action(&app, |orchestrator| async move { orchestrator.generate().await }).await
}

/// POST /api/studio/randomize
async fn randomize(Extension(app): Extension<Arc<AppState>>) -> Response {
    run_action(&app, |orchestrator| async move { orchestrator.randomize().await }).await
}

/// POST /api/studio/analyze
async fn analyze(Extension(app): Extension<Arc<AppState>>) -> Response {
    run_action(&app, |orchestrator| async move { orchestrator.analyze().await }).await
}

/// Workflows run on their own task so a client hanging up can not cancel them midway
async fn run_action<F, Fut>(app: &AppState, action: F) -> Response
where
    F: FnOnce(Orchestrator) -> Fut,
    Fut: Future<Output = ActionOutcome> + Send + 'static,
{
    let task = tokio::spawn(action(app.orchestrator.clone()));
    match task.await {
        Ok(outcome) => Json(ActionResponse {
            outcome,
            state: app.orchestrator.snapshot(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Workflow task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Workflow task failed").into_response()
        }
    }
}

/// GET /api/studio/export - Download everything currently displayed as a text file
async fn export(Extension(app): Extension<Arc<AppState>>) -> Response {
    match app.orchestrator.export() {
        Some(document) => {
            tracing::info!("Exporting {} ({} bytes)", document.filename(), document.content.len());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", document.filename()),
                    ),
                ],
                document.content,
            )
                .into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// POST /api/studio/copy - Text for a copy target; arms its "copied" acknowledgment
async fn copy(
    Extension(app): Extension<Arc<AppState>>,
    Json(target): Json<CopyTarget>,
) -> Response {
    match app.orchestrator.copy_text(target) {
        Some(text) => Json(CopyResponse { target, text }).into_response(),
        None => (StatusCode::NOT_FOUND, "Nothing to copy").into_response(),
    }
}
