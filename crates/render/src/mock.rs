//! Mock Generation Client Implementation
//!
//! Programmable mock for testing submission workflows:
//! - `MockGenerationClient`: records every submitted request
//! - `MockOutcome`: Accept or Reject

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::{GenerationClient, GenerationError, ImageGenerationRequest, VideoGenerationRequest};

/// What the mock should answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockOutcome {
    #[default]
    Accept,
    /// Fail with a response error carrying this message
    Reject(String),
}

/// A recorded submission for test assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedGenerationRequest {
    Image(ImageGenerationRequest),
    Video(VideoGenerationRequest),
}

/// Mock generation client; clones share outcome and history
#[derive(Debug, Clone, Default)]
pub struct MockGenerationClient {
    outcome: Arc<RwLock<MockOutcome>>,
    history: Arc<Mutex<Vec<RecordedGenerationRequest>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.write().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    pub fn outcome(&self) -> MockOutcome {
        self.outcome
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received so far, including rejected ones
    pub fn recorded_requests(&self) -> Vec<RecordedGenerationRequest> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reset(&self) {
        self.set_outcome(MockOutcome::Accept);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, request: RecordedGenerationRequest) -> Result<(), GenerationError> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match self.outcome() {
            MockOutcome::Accept => Ok(()),
            MockOutcome::Reject(message) => Err(GenerationError::Response(message)),
        }
    }
}

#[async_trait::async_trait]
impl GenerationClient for MockGenerationClient {
    async fn submit_image(&self, request: ImageGenerationRequest) -> Result<(), GenerationError> {
        tracing::info!(
            user_id = %request.user_id,
            actor_ref = %request.actor_ref,
            "Mock generation: received image request"
        );
        self.record(RecordedGenerationRequest::Image(request))
    }

    async fn submit_video(&self, request: VideoGenerationRequest) -> Result<(), GenerationError> {
        tracing::info!(
            user_id = %request.user_id,
            document_id = %request.document_id,
            "Mock generation: received video request"
        );
        self.record(RecordedGenerationRequest::Video(request))
    }
}
