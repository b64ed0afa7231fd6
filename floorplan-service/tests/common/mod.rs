#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use floorplan_service::config::{FloorplanConfig, GeneratorConfig, LoggingConfig, StorageConfig};
use floorplan_service::services::providers::FloorPlanGenerator;
use floorplan_service::services::{GenerationInvoker, ProvenanceRecorder};
use floorplan_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_IMAGE_URL: &str = "https://example.test/plans/generated.png";

/// Router wired to a temporary provenance directory and frontend bundle.
pub struct TestApp {
    pub router: Router,
    pub provenance_dir: PathBuf,
    pub static_dir: PathBuf,
    _tmp: TempDir,
}

pub fn test_config(root: &Path, generator: GeneratorConfig) -> FloorplanConfig {
    FloorplanConfig {
        common: CoreConfig { port: 0 },
        storage: StorageConfig {
            provenance_dir: root.join("generated_plans"),
            static_dir: root.join("dist"),
        },
        generator,
        logging: LoggingConfig {
            level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub fn mock_generator() -> GeneratorConfig {
    GeneratorConfig::Mock {
        latency: Duration::ZERO,
        image_url: TEST_IMAGE_URL.to_string(),
    }
}

fn write_bundle(static_dir: &Path) {
    std::fs::create_dir_all(static_dir.join("assets")).unwrap();
    std::fs::write(
        static_dir.join("index.html"),
        "<!doctype html><html><body><div id=\"root\"></div></body></html>",
    )
    .unwrap();
    std::fs::write(static_dir.join("assets/app.js"), "console.log('floor plans');").unwrap();
}

impl TestApp {
    pub async fn with_mock() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), mock_generator());
        let generator = floorplan_service::services::providers::build_generator(&config.generator)
            .unwrap();
        Self::build(tmp, config, generator).await
    }

    pub async fn with_generator(generator: Arc<dyn FloorPlanGenerator>) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), mock_generator());
        Self::build(tmp, config, generator).await
    }

    async fn build(
        tmp: TempDir,
        config: FloorplanConfig,
        generator: Arc<dyn FloorPlanGenerator>,
    ) -> Self {
        write_bundle(&config.storage.static_dir);
        let recorder = ProvenanceRecorder::new(&config.storage.provenance_dir)
            .await
            .unwrap();
        let provenance_dir = config.storage.provenance_dir.clone();
        let static_dir = config.storage.static_dir.clone();
        let state = AppState::new(config, GenerationInvoker::new(generator), recorder);

        TestApp {
            router: build_router(state),
            provenance_dir,
            static_dir,
            _tmp: tmp,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_raw(&self, body: impl Into<Body>, content_type: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/generate-floorplan");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        self.router
            .clone()
            .oneshot(builder.body(body.into()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(&self, body: &serde_json::Value) -> Response {
        self.post_raw(body.to_string(), Some("application/json"))
            .await
    }

    pub fn records(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.provenance_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        paths.sort();
        paths
    }
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
