//! Floor plan generator abstractions and implementations.
//!
//! The invoker talks to a single [`FloorPlanGenerator`] so the canned mock
//! and a real model-serving endpoint can be swapped through configuration.

pub mod mock;
pub mod remote;

use crate::config::GeneratorConfig;
use crate::models::FloorPlanRequest;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use mock::MockGenerator;
pub use remote::RemoteGenerator;

/// Error type for generator operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A floor plan produced by a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlan {
    pub image_url: String,
    pub message: String,
}

/// Turns a validated request into a floor plan image.
#[async_trait]
pub trait FloorPlanGenerator: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &FloorPlanRequest) -> Result<GeneratedPlan, ProviderError>;
}

/// Build the generator selected by configuration.
pub fn build_generator(
    config: &GeneratorConfig,
) -> Result<Arc<dyn FloorPlanGenerator>, ProviderError> {
    let generator: Arc<dyn FloorPlanGenerator> = match config {
        GeneratorConfig::Mock { latency, image_url } => {
            Arc::new(MockGenerator::new(*latency, image_url.clone()))
        }
        GeneratorConfig::Remote { endpoint } => Arc::new(RemoteGenerator::new(endpoint)?),
    };
    Ok(generator)
}
