//! Generator backed by an HTTP model-serving endpoint.
//!
//! The request body is POSTed as JSON unchanged. The endpoint must answer
//! with a 2xx status and a JSON body containing `image_url` and optionally
//! `message`. There is no client-side deadline: the call waits as long as
//! the endpoint takes.

use super::{FloorPlanGenerator, GeneratedPlan, ProviderError};
use crate::models::FloorPlanRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_MESSAGE: &str = "Floor plan generated successfully";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    image_url: String,
    #[serde(default)]
    message: Option<String>,
}

pub struct RemoteGenerator {
    endpoint: String,
    client: Client,
}

impl RemoteGenerator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl FloorPlanGenerator for RemoteGenerator {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, request: &FloorPlanRequest) -> Result<GeneratedPlan, ProviderError> {
        tracing::debug!(endpoint = %self.endpoint, "Sending floor plan request to generator");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Generator returned an error status");
            return Err(ProviderError::ApiError(format!("{} - {}", status, body)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if parsed.image_url.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "generator returned an empty image_url".to_string(),
            ));
        }

        Ok(GeneratedPlan {
            image_url: parsed.image_url,
            message: parsed
                .message
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        })
    }
}
