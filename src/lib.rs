pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod math;
pub mod operation;

use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ai::{CompletionClient, GeminiClient, GeminiConfig};
use crate::config::AppConfig;

/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub official_email: String,
    pub ai: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    pub fn new(
        official_email: impl Into<String>,
        ai: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        Self {
            official_email: official_email.into(),
            ai,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let ai = match &config.gemini_api_key {
            Some(api_key) => {
                tracing::info!(model = %config.gemini_model, "Gemini client configured");
                let client: Arc<dyn CompletionClient> = Arc::new(GeminiClient::new(GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.gemini_model.clone(),
                    api_base: config.gemini_api_base.clone(),
                    timeout_ms: config.ai_timeout_ms,
                }));
                Some(client)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set, the AI operation is disabled");
                None
            }
        };

        Self::new(config.official_email.clone(), ai)
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await.map_err(|e| {
        tracing::error!("Failed to bind port {}: {}", port, e);
        e
    })?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
