//! HTTP Generation Client Implementation
//!
//! POSTs jobs to the generation API at `{base_url}/generate/image` and
//! `{base_url}/generate/video`.

use serde::Serialize;

use crate::{
    GenerationClient, GenerationConfig, GenerationError, ImageGenerationRequest,
    VideoGenerationRequest,
};

/// Real HTTP client for the generation API.
pub struct HttpGenerationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpGenerationClient {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GenerationError::Configuration(
                "Generation base URL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: config.api_key,
        })
    }

    async fn post<T: Serialize + Sync>(&self, route: &str, body: &T) -> Result<(), GenerationError> {
        let url = format!("{}/generate/{}", self.base_url, route);

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(GenerationError::Response(format!(
                "Generation API returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn submit_image(&self, request: ImageGenerationRequest) -> Result<(), GenerationError> {
        self.post("image", &request).await?;
        tracing::info!(
            user_id = %request.user_id,
            actor_ref = %request.actor_ref,
            outfit_count = request.outfit_refs.len(),
            "Image generation submitted"
        );
        Ok(())
    }

    async fn submit_video(&self, request: VideoGenerationRequest) -> Result<(), GenerationError> {
        self.post("video", &request).await?;
        tracing::info!(
            user_id = %request.user_id,
            document_id = %request.document_id,
            "Video generation submitted"
        );
        Ok(())
    }
}
