mod config;
mod error;
mod routes;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, DEFAULT_LOG_FILTER, ServerConfig};
use crate::error::ServerError;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let config = ServerConfig::from_env();

    let log_filter = config.as_ref().map_or(DEFAULT_LOG_FILTER, |c| c.log_filter.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter))
        .init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "measure-map failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Result<ServerConfig, ConfigError>) -> Result<(), ServerError> {
    let config = config?;
    let app = routes::app()?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!(%addr, "measure-map listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
