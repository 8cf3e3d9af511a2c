mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{bfhl, health, not_found};
pub use models::Envelope;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bfhl", post(bfhl))
        .fallback(not_found)
        .with_state(state)
}
