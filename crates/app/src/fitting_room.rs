//! Fitting room workflow
//!
//! Screens feed records into the shared selection store and submit the
//! finished selection to the render backend. A successful submission clears
//! the facets it consumed; a failed one leaves the selection untouched so the
//! user can retry.

use std::sync::Arc;

use fitroom_auth::{SessionProvider, User};
use fitroom_common::{Error, Result};
use fitroom_records::RecordStore;
use fitroom_render::{GenerationClient, ImageGenerationRequest, VideoGenerationRequest};
use fitroom_selection::{ActorSelection, AddOutcome, SharedSelectionStore, VideoGenerationInput};
use uuid::Uuid;

#[derive(Clone)]
pub struct FittingRoom {
    selection: SharedSelectionStore,
    session: Arc<dyn SessionProvider>,
    records: Arc<dyn RecordStore>,
    generation: Arc<dyn GenerationClient>,
}

impl FittingRoom {
    pub fn new(
        selection: SharedSelectionStore,
        session: Arc<dyn SessionProvider>,
        records: Arc<dyn RecordStore>,
        generation: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            selection,
            session,
            records,
            generation,
        }
    }

    pub fn selection(&self) -> &SharedSelectionStore {
        &self.selection
    }

    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    pub fn records(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    async fn signed_in_user(&self) -> Result<User> {
        self.session
            .current()
            .await
            .ok_or_else(|| Error::Authentication("Sign in to generate".to_string()))
    }

    /// Load an actor record and make it the selected actor
    pub async fn select_actor_record(&self, id: Uuid) -> Result<ActorSelection> {
        let actor = self.records.get_actor(id).await?.to_selection();
        self.selection.set_actor(actor.clone());
        Ok(actor)
    }

    /// Load an outfit record and add it to the outfit
    pub async fn add_outfit_record(&self, id: Uuid) -> Result<AddOutcome> {
        let item = self.records.get_outfit(id).await?.to_selection();
        Ok(self.selection.add_outfit_item(item))
    }

    /// Prepare a video from a completed image generation
    pub async fn start_video_from_generation(
        &self,
        id: Uuid,
        prompt: &str,
    ) -> Result<VideoGenerationInput> {
        let generation = self.records.get_generation(id).await?;
        if !generation.is_video_source() {
            return Err(Error::Validation(format!(
                "Generation {} has no completed image to animate",
                id
            )));
        }

        let mut input = VideoGenerationInput::new(id.to_string(), prompt);
        if let Some(url) = generation.image_url {
            input = input.with_preview_image_url(url);
        }

        self.selection.set_video_gen_input(input.clone());
        Ok(input)
    }

    /// Submit the selected actor and outfit for an image generation.
    ///
    /// The actor and outfit are cleared only if nobody changed them while the
    /// request was in flight.
    pub async fn submit_image(&self, prompt: &str) -> Result<ImageGenerationRequest> {
        self.queue_image(prompt)
            .await
            .inspect_err(|e| log_submission_failure("image", e))
    }

    /// Submit the pending video input
    pub async fn submit_video(&self) -> Result<VideoGenerationRequest> {
        self.queue_video()
            .await
            .inspect_err(|e| log_submission_failure("video", e))
    }

    async fn queue_image(&self, prompt: &str) -> Result<ImageGenerationRequest> {
        let user = self.signed_in_user().await?;
        let state = self.selection.snapshot();

        if !state.phase().is_image_ready() {
            let message = if state.actor.is_empty() {
                "Select an actor first"
            } else {
                "Select at least one outfit item"
            };
            return Err(Error::Validation(message.to_string()));
        }

        let request = ImageGenerationRequest {
            user_id: user.id,
            actor_ref: state.actor.image_id.clone(),
            outfit_refs: state
                .outfit_items
                .iter()
                .map(|item| item.image_id.clone())
                .collect(),
            prompt: prompt.trim().to_string(),
        };

        self.generation.submit_image(request.clone()).await?;

        let cleared = self.selection.update(|store| {
            let current = store.state();
            if current.actor != state.actor || current.outfit_items != state.outfit_items {
                return false;
            }
            store.clear_actor();
            store.clear_outfit_items();
            true
        });

        tracing::info!(
            user_id = %user.id,
            actor_ref = %request.actor_ref,
            outfit_count = request.outfit_refs.len(),
            cleared,
            "Image generation queued"
        );
        Ok(request)
    }

    async fn queue_video(&self) -> Result<VideoGenerationRequest> {
        let user = self.signed_in_user().await?;

        let input = self
            .selection
            .snapshot()
            .video_gen_input
            .ok_or_else(|| Error::Validation("Choose a generation to animate".to_string()))?;
        if input.prompt.trim().is_empty() {
            return Err(Error::Validation("Describe the video first".to_string()));
        }

        let request = VideoGenerationRequest {
            user_id: user.id,
            document_id: input.document_id.clone(),
            video_prompt: input.prompt.trim().to_string(),
        };

        self.generation.submit_video(request.clone()).await?;

        let cleared = self.selection.update(|store| {
            if store.state().video_gen_input.as_ref() != Some(&input) {
                return false;
            }
            store.clear_video_gen_input();
            true
        });

        tracing::info!(
            user_id = %user.id,
            document_id = %request.document_id,
            cleared,
            "Video generation queued"
        );
        Ok(request)
    }
}

fn log_submission_failure(kind: &'static str, err: &Error) {
    if err.is_user_facing() {
        tracing::info!(kind, code = err.error_code(), error = %err, "Generation not submitted");
    } else {
        tracing::error!(kind, code = err.error_code(), error = %err, "Generation submission failed");
    }
}
