use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::Envelope;
use crate::math::MathError;

/// Anything that ends a `/bfhl` request early.
///
/// Both kinds are reported to the caller the same way: 400 with the message.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Execution(String),
}

impl RequestError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Execution(_) => "execution",
        }
    }
}

impl From<MathError> for RequestError {
    fn from(err: MathError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, kind = self.kind(), "Rejecting request");
        (
            StatusCode::BAD_REQUEST,
            Json(Envelope::failure(self.to_string())),
        )
            .into_response()
    }
}
