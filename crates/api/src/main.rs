//! Car Price Prediction API - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ApiConfig};
use inference_engine::PricePipeline;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Car Price Prediction API v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::load().context("failed to load configuration")?;

    // The pipeline must load before the listener binds; the service never
    // accepts traffic without it.
    let pipeline = PricePipeline::load(&config.artifact_path)
        .context("failed to load pipeline artifact")?;
    info!(schema = ?pipeline.schema(), "pipeline artifact loaded");

    run_server(&config.bind_addr, pipeline).await
}
