//! Canned generator used until a real model endpoint is wired in.

use super::{FloorPlanGenerator, GeneratedPlan, ProviderError};
use crate::models::FloorPlanRequest;
use async_trait::async_trait;
use std::time::Duration;

pub const MOCK_MESSAGE: &str = "Floor plan generated successfully";

/// Waits a fixed latency, then returns the same placeholder image for every request.
pub struct MockGenerator {
    latency: Duration,
    image_url: String,
}

impl MockGenerator {
    pub fn new(latency: Duration, image_url: impl Into<String>) -> Self {
        Self {
            latency,
            image_url: image_url.into(),
        }
    }
}

#[async_trait]
impl FloorPlanGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, request: &FloorPlanRequest) -> Result<GeneratedPlan, ProviderError> {
        tracing::debug!(
            latency_ms = self.latency.as_millis() as u64,
            field_count = request.fields().len(),
            "Simulating floor plan generation"
        );

        // Simulate model processing time
        tokio::time::sleep(self.latency).await;

        Ok(GeneratedPlan {
            image_url: self.image_url.clone(),
            message: MOCK_MESSAGE.to_string(),
        })
    }
}
