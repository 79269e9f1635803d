//! The chat endpoint.
//!
//! One handler serves both deployment routes. It accepts `{"message"}`,
//! forwards it to the configured backend once, and answers with
//! `{"message"}` or a classified `{"error"}`.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use cileles_core::backend::require_message;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::SharedState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

/// Parse a request body into the question text.
fn question(body: &[u8]) -> Result<String, ApiError> {
    let request: ChatRequest =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let text = match request.message {
        Some(serde_json::Value::String(text)) => text,
        _ => String::new(),
    };
    require_message(&text)?;
    Ok(text)
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    method: Method,
    body: Bytes,
) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => match answer(&state, &body).await {
            Ok(reply) => Json(reply).into_response(),
            Err(e) => e.into_response(),
        },
        other => {
            warn!(method = %other, "Chat route called with unsupported method");
            ApiError::MethodNotAllowed.into_response()
        }
    }
}

async fn answer(state: &SharedState, body: &[u8]) -> Result<ChatResponse, ApiError> {
    let message = question(body)?;
    info!(
        backend = state.backend.name(),
        message_len = message.len(),
        "Chat request received"
    );

    let answer = state.backend.ask(&message).await?;
    Ok(ChatResponse { message: answer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cileles_core::GatewayError;

    #[test]
    fn question_extraction() {
        assert_eq!(question(br#"{"message":"apa itu pH?"}"#).unwrap(), "apa itu pH?");
        assert!(matches!(
            question(br#"{"message":""}"#),
            Err(ApiError::Gateway(GatewayError::BadRequest(_)))
        ));
        assert!(matches!(
            question(br#"{}"#),
            Err(ApiError::Gateway(GatewayError::BadRequest(_)))
        ));
        assert!(matches!(
            question(br#"{"message":42}"#),
            Err(ApiError::Gateway(GatewayError::BadRequest(_)))
        ));
        assert!(matches!(question(b"not json"), Err(ApiError::InvalidBody(_))));
    }
}
