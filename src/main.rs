use anyhow::Context;
use ecsdemo_frontend::{AppState, Config, HttpServer, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    telemetry::init_tracing(config.logging.format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.discovery.backend,
        "Configuration loaded"
    );

    let state = AppState::from_config(config)
        .await
        .context("failed to build application state")?;
    HttpServer::new(state).run().await
}
