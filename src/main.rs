use std::sync::Arc;

use bfhl_service::{build_app, config::AppConfig, run_server, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let state = Arc::new(AppState::from_config(&config));

    tracing::info!(
        port = config.port,
        official_email = %config.official_email,
        ai_enabled = state.ai.is_some(),
        "Starting bfhl-service"
    );

    run_server(build_app(state), config.port).await
}
