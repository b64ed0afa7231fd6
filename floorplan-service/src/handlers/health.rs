use axum::{response::IntoResponse, Json};
use chrono::Local;
use serde_json::json;

pub const SERVICE_NAME: &str = "AI Floor Plan Generator";

/// Local time as ISO-8601 without offset, microsecond precision.
fn iso_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": iso_timestamp(),
        "service": SERVICE_NAME
    }))
}

pub async fn api_test() -> impl IntoResponse {
    Json(json!({
        "message": "Floor plan backend is working!",
        "timestamp": iso_timestamp()
    }))
}
