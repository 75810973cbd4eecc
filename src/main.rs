use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vehicle_counter::adapters::{
    http::{router, state::HttpState, WS_PATH},
    onnx::{model_catalog::OnnxModelCatalog, yolo_engine::OnnxYoloEngine},
};
use vehicle_counter::application::{
    aggregator::Aggregator,
    ports::ModelCatalogPort,
    services::FramePipeline,
    session::ConnectionHandler,
};
use vehicle_counter::config::ServerConfig;
use vehicle_counter::domain::category::CategoryTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=info unless told otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();
    config.validate()?;

    // The detector is built once and shared by every connection.
    let model = config.model_id();
    OnnxModelCatalog::new().validate_model(&model).await?;
    let engine = OnnxYoloEngine::load(&model, config.yolo_params(), config.intra_threads)
        .with_context(|| format!("loading model {}", model.onnx_path))?;

    let aggregator = Aggregator::new(CategoryTable::coco_vehicles(), config.boxes);
    let pipeline = Arc::new(FramePipeline::new(Arc::new(engine), aggregator));

    let state = HttpState {
        handler: Arc::new(ConnectionHandler::new(pipeline)),
        model_name: model.name.as_str().into(),
        max_frame_bytes: config.max_frame_bytes,
    };
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("vehicle counter listening on ws://{}{}", addr, WS_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {}", e);
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
    tracing::info!("shutdown signal received");
}
