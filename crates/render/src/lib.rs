//! Fitroom Generation Client
//!
//! Submits try-on jobs to the render backend:
//! - HTTP client for the generation API in production
//! - Mock client for testing and development
//! - Configurable provider, base URL, and API key
//!
//! Submission only queues work. Results appear later as generation records.

pub mod client;
pub mod mock;

use fitroom_common::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation configuration error: {0}")]
    Configuration(String),

    #[error("Generation request error: {0}")]
    Request(String),

    #[error("Generation response error: {0}")]
    Response(String),
}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Configuration(_) => Error::Internal(err.to_string()),
            GenerationError::Request(_) | GenerationError::Response(_) => {
                Error::Upstream(err.to_string())
            }
        }
    }
}

/// Render an actor wearing the selected outfit items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub user_id: Uuid,
    pub actor_ref: String,
    /// Outfit item ids in selection order
    pub outfit_refs: Vec<String>,
    pub prompt: String,
}

/// Animate a previously generated image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGenerationRequest {
    pub user_id: Uuid,
    pub document_id: String,
    pub video_prompt: String,
}

/// Generation client configuration
#[derive(Clone)]
pub struct GenerationConfig {
    /// Generation provider (http, mock)
    pub provider: String,
    /// Base URL of the generation API
    pub base_url: String,
    /// Optional bearer token for the generation API
    pub api_key: Option<String>,
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GenerationConfig {
    /// Create generation config from environment variables
    pub fn from_env() -> Result<Self, GenerationError> {
        let provider =
            std::env::var("GENERATION_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let base_url = std::env::var("GENERATION_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let api_key = std::env::var("GENERATION_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        if provider == "http" && base_url.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "GENERATION_BASE_URL is required for http provider".to_string(),
            ));
        }

        Ok(Self {
            provider,
            base_url,
            api_key,
        })
    }
}

/// Generation client trait for different render backends
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// Queue an image generation
    async fn submit_image(&self, request: ImageGenerationRequest) -> Result<(), GenerationError>;

    /// Queue a video generation
    async fn submit_video(&self, request: VideoGenerationRequest) -> Result<(), GenerationError>;
}

/// Factory for creating GenerationClient implementations
pub struct GenerationClientFactory;

impl GenerationClientFactory {
    pub fn create(config: GenerationConfig) -> Result<Box<dyn GenerationClient>, GenerationError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating HTTP generation client");
                Ok(Box::new(client::HttpGenerationClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock generation client");
                Ok(Box::new(mock::MockGenerationClient::new()))
            }
            provider => Err(GenerationError::Configuration(format!(
                "Unknown generation provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
