//! Relay gateway: the client side of the deployed chat endpoint.
//!
//! Speaks the narrow `{"message"}` protocol: the question goes out as
//! `{"message": ...}`, the answer comes back as `{"message": ...}` and a
//! failure as a non-2xx status with `{"error": ...}`. The endpoint itself
//! holds the language-model credential.

use async_trait::async_trait;
use cileles_core::backend::require_message;
use cileles_core::error::EMPTY_ANSWER_FALLBACK;
use cileles_core::{Backend, Error, GatewayError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default HTTP client timeout for one relay round trip.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls a chat endpoint that fronts the language model.
pub struct RelayGateway {
    endpoint: String,
    credential: Option<String>,
    client: reqwest::Client,
}

impl RelayGateway {
    /// Create a relay client for `endpoint`, optionally sending a bearer credential.
    pub fn new(
        endpoint: impl Into<String>,
        credential: Option<String>,
    ) -> cileles_core::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            credential: credential.filter(|c| !c.trim().is_empty()),
            client,
        })
    }
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: Option<String>,
}

/// Pull the `{"error"}` text out of a failure body, if there is one.
pub(crate) fn error_text(body: &str) -> Option<String> {
    serde_json::from_str::<RelayErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
}

#[async_trait]
impl Backend for RelayGateway {
    fn name(&self) -> &str {
        "relay"
    }

    async fn ask(&self, message: &str) -> std::result::Result<String, GatewayError> {
        let message = require_message(message)?;

        info!(endpoint = %self.endpoint, "Sending assistant request");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&RelayRequest { message });
        if let Some(credential) = &self.credential {
            request = request.bearer_auth(credential);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Relay unreachable");
            GatewayError::UpstreamUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = GatewayError::from_status(status.as_u16(), error_text(&body));
            warn!(status = status.as_u16(), kind = %err.kind(), "Relay returned error");
            return Err(err);
        }

        let reply: RelayReply = response
            .json()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(format!("malformed reply: {e}")))?;

        debug!(status = status.as_u16(), "Relay answered");

        Ok(match reply.message {
            Some(serde_json::Value::String(text)) if !text.is_empty() => text,
            _ => EMPTY_ANSWER_FALLBACK.to_string(),
        })
    }
}
