// src/orchestrator.rs
//! Owns the studio state and runs the generate / randomize / analyze workflows.
//!
//! A workflow starts only when nothing else is in flight. Starting one clears the
//! prompts, metadata and error of the previous run; results are stored only once
//! the step producing them has fully succeeded. The state lock is never held
//! across an await, so snapshots stay readable while a workflow waits on the network.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clipboard::{CopyTarget, CopyTracker};
use crate::error::{SelectionError, StudioError};
use crate::export::{build_export, ExportDocument};
use crate::gemini_client::GenerativeModel;
use crate::options::OptionCatalog;
use crate::services::{ImageAnalysisRequester, MetadataRequester, RandomizationRequester};
use crate::templates;
use crate::thumbnail::{extract_video_id, ThumbnailFetcher};
use crate::types::{
    BilingualMeta, InFlight, PromptBundle, ScenarioMode, SelectionField, SubjectSelection,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioState {
    pub mode: ScenarioMode,
    pub selection: SubjectSelection,
    pub options: OptionCatalog,
    pub shorts_url: String,
    pub prompts: PromptBundle,
    pub meta: Option<BilingualMeta>,
    pub error: Option<String>,
    pub in_flight: InFlight,
    pub updated_at: DateTime<Utc>,
}

impl Default for StudioState {
    fn default() -> Self {
        let options = OptionCatalog::default();
        Self {
            mode: ScenarioMode::default(),
            selection: options.default_selection(),
            options,
            shorts_url: String::new(),
            prompts: PromptBundle::default(),
            meta: None,
            error: None,
            in_flight: InFlight::Idle,
            updated_at: Utc::now(),
        }
    }
}

/// Why a trigger was dropped without touching the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    Busy,
    WrongMode,
    MissingUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Completed,
    Failed { message: String },
    Ignored { reason: IgnoreReason },
}

/// Resets the in-flight flag when the workflow ends, however it ends
struct FlightGuard<'a> {
    state: &'a Mutex<StudioState>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = InFlight::Idle;
        state.updated_at = Utc::now();
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    state: Arc<Mutex<StudioState>>,
    copies: CopyTracker,
    randomizer: RandomizationRequester,
    metadata: MetadataRequester,
    analyzer: ImageAnalysisRequester,
    thumbnails: ThumbnailFetcher,
}

impl Orchestrator {
    pub fn new(model: Arc<dyn GenerativeModel>, thumbnails: ThumbnailFetcher) -> Self {
        Self {
            state: Arc::new(Mutex::new(StudioState::default())),
            copies: CopyTracker::default(),
            randomizer: RandomizationRequester::new(Arc::clone(&model)),
            metadata: MetadataRequester::new(Arc::clone(&model)),
            analyzer: ImageAnalysisRequester::new(model),
            thumbnails,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StudioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> StudioState {
        self.lock().clone()
    }

    pub fn copies(&self) -> &CopyTracker {
        &self.copies
    }

    /// Tab switches are always allowed, even mid-request
    pub fn set_mode(&self, mode: ScenarioMode) {
        let mut state = self.lock();
        state.mode = mode;
        state.updated_at = Utc::now();
    }

    pub fn set_shorts_url(&self, url: &str) {
        let mut state = self.lock();
        state.shorts_url = url.trim().to_string();
        state.updated_at = Utc::now();
    }

    pub fn select(&self, field: SelectionField, value: &str) -> Result<(), SelectionError> {
        let mut state = self.lock();
        if state.in_flight.is_busy() {
            return Err(SelectionError::Busy);
        }
        if !state.options.field(field).contains(value) {
            return Err(SelectionError::UnknownOption {
                field: field_name(field),
                value: value.to_string(),
            });
        }

        let slot = match field {
            SelectionField::Primary => &mut state.selection.primary,
            SelectionField::Secondary => &mut state.selection.secondary,
            SelectionField::Backdrop => &mut state.selection.backdrop,
        };
        *slot = value.to_string();
        state.updated_at = Utc::now();
        Ok(())
    }

    /// Builds prompts from the current selection and asks for metadata
    pub async fn generate(&self) -> ActionOutcome {
        let (_guard, (mode, selection)) = match self.begin(InFlight::Generating, |state| {
            if state.mode.is_template_mode() {
                Ok((state.mode, state.selection.clone()))
            } else {
                Err(IgnoreReason::WrongMode)
            }
        }) {
            Ok(started) => started,
            Err(reason) => return ActionOutcome::Ignored { reason },
        };

        tracing::info!(mode = %mode, "generating prompts");
        let result = self.run_generate(mode, &selection).await;
        self.finish(InFlight::Generating, result)
    }

    /// Asks the model for new subjects, folds them into the options and generates from them
    pub async fn randomize(&self) -> ActionOutcome {
        let (_guard, mode) = match self.begin(InFlight::Randomizing, |state| {
            if state.mode.is_template_mode() {
                Ok(state.mode)
            } else {
                Err(IgnoreReason::WrongMode)
            }
        }) {
            Ok(started) => started,
            Err(reason) => return ActionOutcome::Ignored { reason },
        };

        tracing::info!(mode = %mode, "randomizing subjects");
        let result = self.run_randomize(mode).await;
        self.finish(InFlight::Randomizing, result)
    }

    /// Fetches the Shorts thumbnail and turns it into a three-scene storyline
    pub async fn analyze(&self) -> ActionOutcome {
        let (_guard, url) = match self.begin(InFlight::Analyzing, |state| {
            if state.mode != ScenarioMode::Analyze {
                Err(IgnoreReason::WrongMode)
            } else if state.shorts_url.is_empty() {
                Err(IgnoreReason::MissingUrl)
            } else {
                Ok(state.shorts_url.clone())
            }
        }) {
            Ok(started) => started,
            Err(reason) => return ActionOutcome::Ignored { reason },
        };

        tracing::info!(url = %url, "analyzing shorts");
        let result = self.run_analyze(&url).await;
        self.finish(InFlight::Analyzing, result)
    }

    pub fn export(&self) -> Option<ExportDocument> {
        let state = self.lock();
        build_export(&state.prompts, state.meta.as_ref(), state.mode)
    }

    /// Text for a copy target, acknowledging the copy when the target exists
    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        let text = {
            let state = self.lock();
            match target {
                CopyTarget::ImagePrompt(i) => state.prompts.image_prompts.get(i).cloned(),
                CopyTarget::VideoPrompt(i) => state.prompts.video_prompts.get(i).cloned(),
                CopyTarget::Metadata => state.meta.as_ref().map(BilingualMeta::combined_text),
            }
        }?;
        self.copies.acknowledge(target);
        Some(text)
    }

    /// Single check-and-set entry point for every workflow
    fn begin<T>(
        &self,
        activity: InFlight,
        prepare: impl FnOnce(&StudioState) -> Result<T, IgnoreReason>,
    ) -> Result<(FlightGuard<'_>, T), IgnoreReason> {
        let mut state = self.lock();
        if state.in_flight.is_busy() {
            tracing::debug!(requested = ?activity, running = ?state.in_flight, "dropping trigger while busy");
            return Err(IgnoreReason::Busy);
        }
        let input = prepare(&state).map_err(|reason| {
            tracing::debug!(requested = ?activity, ?reason, "ignoring trigger");
            reason
        })?;

        state.in_flight = activity;
        state.prompts.clear();
        state.meta = None;
        state.error = None;
        state.updated_at = Utc::now();
        drop(state);

        self.copies.clear();
        Ok((FlightGuard { state: &self.state }, input))
    }

    fn finish(&self, activity: InFlight, result: Result<(), StudioError>) -> ActionOutcome {
        match result {
            Ok(()) => {
                tracing::info!(workflow = ?activity, "workflow completed");
                ActionOutcome::Completed
            }
            Err(e) => {
                match std::error::Error::source(&e) {
                    Some(cause) => tracing::error!(workflow = ?activity, "{}: {}", e, cause),
                    None => tracing::error!(workflow = ?activity, "{}", e),
                }
                let message = e.to_string();
                self.lock().error = Some(message.clone());
                ActionOutcome::Failed { message }
            }
        }
    }

    async fn run_generate(&self, mode: ScenarioMode, selection: &SubjectSelection) -> Result<(), StudioError> {
        let prompts = template_prompts(mode, selection);
        let concept = prompts.video_prompts.first().cloned().unwrap_or_default();
        self.store_prompts(prompts);
        self.attach_metadata(&concept).await
    }

    async fn run_randomize(&self, mode: ScenarioMode) -> Result<(), StudioError> {
        let suggestion = self
            .randomizer
            .suggest(mode)
            .await
            .map_err(StudioError::Randomize)?;

        let selection = {
            let mut state = self.lock();
            state.options.backdrop.insert(&suggestion.backdrop);
            state.selection.backdrop = suggestion.backdrop.clone();

            state.options.primary.insert(&suggestion.primary);
            state.selection.primary = suggestion.primary.clone();

            if mode == ScenarioMode::Faceoff {
                state.options.secondary.insert(&suggestion.secondary);
                state.selection.secondary = suggestion.secondary.clone();
            }
            state.selection.clone()
        };

        self.run_generate(mode, &selection).await
    }

    async fn run_analyze(&self, url: &str) -> Result<(), StudioError> {
        let video_id = extract_video_id(url).ok_or(StudioError::InvalidUrl)?;
        let thumbnail_url = self.thumbnails.thumbnail_url(&video_id);

        let image = self
            .thumbnails
            .fetch_as_base64(&thumbnail_url)
            .await
            .map_err(StudioError::ThumbnailUnavailable)?;

        let storyline = self
            .analyzer
            .analyze(&image)
            .await
            .map_err(StudioError::Analyze)?;

        self.store_prompts(storyline.prompts);
        self.attach_metadata(&storyline.video_concept).await
    }

    fn store_prompts(&self, prompts: PromptBundle) {
        let mut state = self.lock();
        state.prompts = prompts;
        state.updated_at = Utc::now();
    }

    async fn attach_metadata(&self, video_concept: &str) -> Result<(), StudioError> {
        if video_concept.trim().is_empty() {
            return Ok(());
        }
        let meta = self
            .metadata
            .generate(video_concept)
            .await
            .map_err(StudioError::Metadata)?;

        let mut state = self.lock();
        state.meta = Some(meta);
        state.updated_at = Utc::now();
        Ok(())
    }
}

fn template_prompts(mode: ScenarioMode, selection: &SubjectSelection) -> PromptBundle {
    if mode == ScenarioMode::Faceoff {
        PromptBundle::single(
            templates::faceoff_image_prompt(&selection.primary, &selection.secondary, &selection.backdrop),
            templates::faceoff_video_prompt(&selection.primary, &selection.secondary, &selection.backdrop),
        )
    } else {
        PromptBundle::single(
            templates::celebration_image_prompt(&selection.primary, &selection.backdrop),
            templates::celebration_video_prompt(&selection.primary, &selection.backdrop),
        )
    }
}

fn field_name(field: SelectionField) -> &'static str {
    match field {
        SelectionField::Primary => "primary",
        SelectionField::Secondary => "secondary",
        SelectionField::Backdrop => "backdrop",
    }
}
