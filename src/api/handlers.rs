use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::operation::Operation;
use crate::AppState;

use super::models::Envelope;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Envelope> {
    Json(Envelope::healthy(state.official_email.as_str()))
}

pub async fn bfhl(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Envelope>, RequestError> {
    let operation = Operation::from_body(parse_body(&body)?)?;
    tracing::debug!(key = operation.key(), "Dispatching operation");

    let data = operation.execute(&state).await?;
    Ok(Json(Envelope::success(state.official_email.as_str(), data)))
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Envelope::failure("Not found"))).into_response()
}

/// An absent body counts as `{}`.
fn parse_body(body: &[u8]) -> Result<Map<String, Value>, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RequestError::validation(
            "Request body must be a JSON object",
        )),
        Err(_) => Err(RequestError::validation("Request body must be valid JSON")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_body;

    #[test]
    fn blank_body_is_an_empty_object() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b" \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert_eq!(
            parse_body(b"[1,2]").unwrap_err().to_string(),
            "Request body must be a JSON object"
        );
        assert_eq!(
            parse_body(b"{\"fibonacci\":").unwrap_err().to_string(),
            "Request body must be valid JSON"
        );
    }
}
