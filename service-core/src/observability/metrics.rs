//! Prometheus exposition for the `metrics` facade.

use axum::{http::header, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder as the global `metrics` recorder.
///
/// Safe to call more than once; later calls return the handle created by the
/// first one.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!("Metrics recorder already installed: {}", e);
            }
            handle
        })
        .clone()
}

/// Render all collected metrics in the Prometheus text format.
pub async fn metrics_handler() -> impl IntoResponse {
    let body = init_metrics().render();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
