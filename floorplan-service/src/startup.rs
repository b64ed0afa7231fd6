//! Application startup and lifecycle management.

use crate::config::FloorplanConfig;
use crate::handlers;
use crate::services::providers::build_generator;
use crate::services::{GenerationInvoker, ProvenanceRecorder};
use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::{Request, StatusCode, Uri},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use service_core::error::{AppError, ErrorResponse};
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use service_core::observability::{init_metrics, metrics_handler};
use std::any::Any;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: FloorplanConfig,
    pub invoker: GenerationInvoker,
    pub recorder: ProvenanceRecorder,
}

impl AppState {
    pub fn new(
        config: FloorplanConfig,
        invoker: GenerationInvoker,
        recorder: ProvenanceRecorder,
    ) -> Self {
        Self {
            config,
            invoker,
            recorder,
        }
    }
}

/// Turn a handler panic into the standard 500 envelope.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    };
    tracing::error!(cause = %cause, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: format!("Server error: {}", cause),
        }),
    )
        .into_response()
}

/// JSON 404 for paths missing from the frontend bundle.
async fn static_not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("{}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    // `/metrics` renders whatever the global recorder has collected.
    init_metrics();
    let static_files = ServeDir::new(&state.config.storage.static_dir)
        .not_found_service(static_not_found.into_service());

    Router::new()
        // Floor plan submissions are accepted whatever their size.
        .route(
            "/generate-floorplan",
            post(handlers::generate_floorplan).layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(handlers::health_check))
        .route("/api/test", get(handlers::api_test))
        .route("/metrics", get(metrics_handler))
        .fallback_service(static_files)
        .layer(from_fn(metrics_middleware))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: ServerFuture,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Creates the provenance directory, selects the generator and binds the
    /// listener (port 0 picks a random port, for tests).
    pub async fn build(config: FloorplanConfig) -> Result<Self, AppError> {
        let recorder = ProvenanceRecorder::new(&config.storage.provenance_dir)
            .await
            .map_err(|e| {
                tracing::error!("Failed to initialize provenance storage: {}", e);
                AppError::from(e)
            })?;

        let generator = build_generator(&config.generator).map_err(|e| {
            tracing::error!("Failed to initialize floor plan generator: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        let invoker = GenerationInvoker::new(generator);

        tracing::info!(
            generator = invoker.generator_name(),
            provenance_dir = %config.storage.provenance_dir.display(),
            static_dir = %config.storage.static_dir.display(),
            "Initialized floor plan pipeline"
        );

        let state = AppState::new(config.clone(), invoker, recorder);
        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Floor plan service listening on port {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn recorder(&self) -> &ProvenanceRecorder {
        &self.state.recorder
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
