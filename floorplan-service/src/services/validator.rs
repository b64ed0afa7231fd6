//! Required-field validation for inbound floor plan requests.

use crate::models::{FloorPlanRequest, REQUIRED_FIELDS};
use serde_json::Value;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No data provided")]
    NoData,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

/// Parse a raw request body. Empty, malformed or falsy JSON counts as no data.
pub fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) if is_truthy(&value) => Ok(value),
        _ => Err(ValidationError::NoData),
    }
}

/// Check that `body` is an object carrying every required field with a
/// non-empty value. All missing fields are reported together.
pub fn validate(body: Value) -> Result<FloorPlanRequest, ValidationError> {
    if !is_truthy(&body) {
        return Err(ValidationError::NoData);
    }

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.get(field).is_some_and(is_truthy))
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    match body {
        Value::Object(fields) => Ok(FloorPlanRequest::from_validated(fields)),
        // Non-objects have no fields, so they were rejected above.
        _ => Err(ValidationError::MissingFields(REQUIRED_FIELDS.to_vec())),
    }
}

/// Null, false, zero, and empty strings, arrays or objects are empty values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
