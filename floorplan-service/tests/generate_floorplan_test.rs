mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, TestApp, TEST_IMAGE_URL};
use floorplan_service::models::{FloorPlanRequest, ProvenanceRecord};
use floorplan_service::services::providers::{FloorPlanGenerator, GeneratedPlan, ProviderError};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn complete_request_generates_plan_and_records_it() {
    let app = TestApp::with_mock().await;
    let body = json!({"sqft": "1200", "depth": "40", "width": "30"});

    let response = app.post_json(&body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["image_url"], TEST_IMAGE_URL);
    assert_eq!(json["message"], "Floor plan generated successfully");
    assert!(json.get("error").is_none());

    let records = app.records();
    assert_eq!(records.len(), 1);
    let name = records[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("request_") && name.ends_with(".json"));
}

#[tokio::test]
async fn record_holds_submitted_body_verbatim() {
    let app = TestApp::with_mock().await;
    let body = json!({
        "width": 30,
        "sqft": "1200",
        "depth": "40",
        "bedrooms": "3",
        "bathrooms": "2",
        "style": "modern",
        "extras": {"garage": true, "floors": [1, 2]}
    });

    let response = app.post_json(&body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let records = app.records();
    assert_eq!(records.len(), 1);
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&records[0]).unwrap()).unwrap();
    assert_eq!(raw["request_data"], body);
    assert_eq!(raw["result"]["success"], true);

    let timestamp = raw["timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), "YYYYMMDD_HHMMSS".len());
    assert_eq!(&timestamp[8..9], "_");
    assert!(records[0]
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with(&format!("request_{}", timestamp)));

    let record: ProvenanceRecord = serde_json::from_value(raw).unwrap();
    assert_eq!(record.request_data.get("style"), Some(&json!("modern")));
}

#[tokio::test]
async fn large_bodies_are_accepted() {
    let app = TestApp::with_mock().await;
    let notes = "x".repeat(3 * 1024 * 1024);
    let body = json!({"sqft": "1200", "depth": "40", "width": "30", "notes": notes});

    let response = app.post_json(&body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let records = app.records();
    assert_eq!(records.len(), 1);
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&records[0]).unwrap()).unwrap();
    assert_eq!(raw["request_data"]["notes"].as_str().map(str::len), Some(notes.len()));
}

#[tokio::test]
async fn interrupted_body_is_no_data() {
    let app = TestApp::with_mock().await;
    let chunks: Vec<Result<axum::body::Bytes, std::io::Error>> = vec![
        Ok(axum::body::Bytes::from_static(b"{\"sqft\": \"12")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away")),
    ];

    let response = app
        .post_raw(
            axum::body::Body::from_stream(futures::stream::iter(chunks)),
            Some("application/json"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "error": "No data provided"})
    );
    assert!(app.records().is_empty());
}

#[tokio::test]
async fn each_accepted_request_gets_its_own_record() {
    let app = TestApp::with_mock().await;

    for sqft in ["900", "1200", "1500"] {
        let response = app
            .post_json(&json!({"sqft": sqft, "depth": "40", "width": "30"}))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(app.records().len(), 3);
}

#[tokio::test]
async fn missing_fields_are_listed_in_order() {
    let app = TestApp::with_mock().await;

    let cases = [
        (json!({"sqft": "1200"}), "Missing required fields: depth, width"),
        (json!({"depth": "40"}), "Missing required fields: sqft, width"),
        (json!({"sqft": "1200", "depth": "40"}), "Missing required fields: width"),
        (
            json!({"sqft": "", "depth": 0, "width": null}),
            "Missing required fields: sqft, depth, width",
        ),
        (
            json!({"style": "modern"}),
            "Missing required fields: sqft, depth, width",
        ),
        (json!([1, 2, 3]), "Missing required fields: sqft, depth, width"),
    ];

    for (body, expected) in cases {
        let response = app.post_json(&body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": expected}),
            "body: {}",
            body
        );
    }

    assert!(app.records().is_empty());
}

#[tokio::test]
async fn empty_or_unparseable_body_is_no_data() {
    let app = TestApp::with_mock().await;
    let expected = json!({"success": false, "error": "No data provided"});

    let bodies: [(&str, Option<&str>); 5] = [
        ("", Some("application/json")),
        ("", None),
        ("sqft=1200&depth=40", Some("application/x-www-form-urlencoded")),
        ("{}", Some("application/json")),
        ("null", Some("application/json")),
    ];

    for (body, content_type) in bodies {
        let response = app.post_raw(body, content_type).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(body_json(response).await, expected);
    }

    assert!(app.records().is_empty());
}

struct UnavailableGenerator;

#[async_trait]
impl FloorPlanGenerator for UnavailableGenerator {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn generate(&self, _request: &FloorPlanRequest) -> Result<GeneratedPlan, ProviderError> {
        Err(ProviderError::ApiError("503 Service Unavailable - model warming up".to_string()))
    }
}

struct PanickingGenerator;

#[async_trait]
impl FloorPlanGenerator for PanickingGenerator {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn generate(&self, _request: &FloorPlanRequest) -> Result<GeneratedPlan, ProviderError> {
        panic!("model weights missing");
    }
}

#[tokio::test]
async fn generation_failure_is_a_200_with_failure_body() {
    let app = TestApp::with_generator(Arc::new(UnavailableGenerator)).await;

    let response = app
        .post_json(&json!({"sqft": "1200", "depth": "40", "width": "30"}))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "success": false,
            "error": "AI generation failed: API error: 503 Service Unavailable - model warming up"
        })
    );

    let records = app.records();
    assert_eq!(records.len(), 1);
    let record: ProvenanceRecord =
        serde_json::from_str(&std::fs::read_to_string(&records[0]).unwrap()).unwrap();
    assert!(!record.result.is_success());
}

#[tokio::test]
async fn generator_panic_is_a_failure_result() {
    let app = TestApp::with_generator(Arc::new(PanickingGenerator)).await;

    let response = app
        .post_json(&json!({"sqft": "1200", "depth": "40", "width": "30"}))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "AI generation failed: model weights missing");
    assert_eq!(app.records().len(), 1);
}

#[tokio::test]
async fn recorder_failure_is_a_server_error() {
    let app = TestApp::with_mock().await;
    std::fs::remove_dir_all(&app.provenance_dir).unwrap();

    let response = app
        .post_json(&json!({"sqft": "1200", "depth": "40", "width": "30"}))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Server error: "), "error: {}", error);
    assert!(error.contains("Failed to write provenance record"));
}
