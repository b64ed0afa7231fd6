use floorplan_service::config::FloorplanConfig;
use floorplan_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FloorplanConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "floorplan-service",
        &config.logging.level,
        config.logging.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        generator = config.generator.kind(),
        "Starting floor plan service: POST /generate-floorplan, GET /health, GET /api/test, GET /metrics, GET / (frontend)"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    tracing::info!("Floor plan service stopped");
    Ok(())
}
