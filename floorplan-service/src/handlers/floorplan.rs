use crate::models::GenerationResult;
use crate::services::validator::{self, ValidationError};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use service_core::error::AppError;

/// `POST /generate-floorplan`
///
/// Validation problems are answered with 400. Generator failures are still a
/// 200 with `success: false` in the body; only faults after validation that
/// are not generation failures (such as a provenance write error) become 500.
pub async fn generate_floorplan(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    // An unreadable body carries no usable data.
    let body = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Failed to read floor plan request body");
        AppError::from(ValidationError::NoData)
    })?;

    let request = validator::parse_body(&body)
        .and_then(validator::validate)
        .map_err(|e| {
            tracing::info!(error = %e, "Rejected floor plan request");
            e
        })?;

    tracing::info!(
        request = %serde_json::Value::Object(request.fields().clone()),
        "Received floor plan request"
    );

    let result = state.invoker.invoke(&request).await;

    tracing::info!(
        generator = state.invoker.generator_name(),
        success = result.is_success(),
        result = ?result,
        "Floor plan generation result"
    );

    state.recorder.record(&request, &result).await?;

    Ok(Json(result))
}
