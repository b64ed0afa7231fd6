//! Normalizes generator calls into a [`GenerationResult`].

use super::providers::FloorPlanGenerator;
use crate::models::{FloorPlanRequest, GenerationResult};
use futures::FutureExt;
use metrics::counter;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Calls the configured generator and never lets a fault escape.
///
/// Provider errors and panics raised while generating are both reported as
/// [`GenerationResult::Failure`].
#[derive(Clone)]
pub struct GenerationInvoker {
    generator: Arc<dyn FloorPlanGenerator>,
}

impl GenerationInvoker {
    pub fn new(generator: Arc<dyn FloorPlanGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    pub async fn invoke(&self, request: &FloorPlanRequest) -> GenerationResult {
        let start = Instant::now();
        let outcome = AssertUnwindSafe(self.generator.generate(request))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(plan)) => GenerationResult::success(plan.image_url, plan.message),
            Ok(Err(e)) => {
                tracing::warn!(generator = self.generator.name(), error = %e, "Floor plan generation failed");
                GenerationResult::failure(e)
            }
            Err(panic) => {
                let cause = panic_message(&*panic);
                tracing::error!(generator = self.generator.name(), cause = %cause, "Floor plan generator panicked");
                GenerationResult::failure(cause)
            }
        };

        counter!(
            "floorplan_generations_total",
            "generator" => self.generator.name(),
            "outcome" => result.outcome()
        )
        .increment(1);
        tracing::debug!(
            generator = self.generator.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            outcome = result.outcome(),
            "Generation finished"
        );

        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "generator panicked".to_string()
    }
}
