//! HTTP error mapping for the chat endpoint.
//!
//! Every failure leaves the gateway as a status code plus `{"error": ...}`.
//! Transport details from the language-model call are logged, never sent.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cileles_core::GatewayError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Text returned when the server has no language-model credential.
pub const CREDENTIAL_MISSING_TEXT: &str =
    "OpenAI API key not configured. Please set OPENAI_API_KEY environment variable.";

fn upstream_text(status: StatusCode) -> String {
    format!(
        "OpenAI API error: {}",
        status.canonical_reason().unwrap_or("Unknown")
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new("Method not allowed"),
            ),
            ApiError::InvalidBody(reason) => {
                tracing::warn!(reason = %reason, "Rejected chat request body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Invalid JSON body"),
                )
            }
            ApiError::Gateway(err) => match err {
                GatewayError::BadRequest(reason) => {
                    (StatusCode::BAD_REQUEST, ErrorResponse::new(reason.as_str()))
                }
                GatewayError::Unauthorized => (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new(upstream_text(StatusCode::UNAUTHORIZED)),
                ),
                GatewayError::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorResponse::new(upstream_text(StatusCode::TOO_MANY_REQUESTS)),
                ),
                GatewayError::Forbidden => (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new(upstream_text(StatusCode::FORBIDDEN)),
                ),
                GatewayError::UpstreamUnavailable(reason) => {
                    tracing::error!(reason = %reason, "Language model unavailable");
                    (
                        StatusCode::BAD_GATEWAY,
                        ErrorResponse::new(upstream_text(StatusCode::BAD_GATEWAY)),
                    )
                }
                GatewayError::CredentialNotConfigured => {
                    tracing::error!("Language model credential not configured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new(CREDENTIAL_MISSING_TEXT),
                    )
                }
                GatewayError::Unknown { status, message } => {
                    let status = StatusCode::from_u16(*status)
                        .ok()
                        .filter(|s| s.is_client_error() || s.is_server_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY);
                    let text = message.clone().unwrap_or_else(|| upstream_text(status));
                    (status, ErrorResponse::new(text))
                }
            },
        };

        (status, Json(body)).into_response()
    }
}
