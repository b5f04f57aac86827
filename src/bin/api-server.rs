//! AirWatch API Server
//!
//! HTTP API exposing current (rule-based) and predicted (model-based) AQI,
//! category lookup, health check and metrics. Stateless apart from the
//! lazily loaded model, so it can be horizontally scaled.

use airwatch::config::ServerConfig;
use airwatch::core::http::start_server;
use airwatch::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = ServerConfig::from_env();
    let port = config.port;
    info!("Starting AirWatch API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(model = %config.model.model_path().display(), "Model artifact");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
