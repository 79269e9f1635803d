//! Backend trait: the abstraction over assistant endpoints.
//!
//! A Backend takes one user question and returns the answer text or a
//! classified [`GatewayError`]. Implementations: the relay client that calls
//! a deployed chat endpoint, and the OpenAI-compatible client that calls the
//! language model directly.

use async_trait::async_trait;

use crate::error::GatewayError;

/// The core Backend trait.
///
/// Callers never learn which deployment target is behind it; that is
/// decided once from configuration.
#[async_trait]
pub trait Backend: Send + Sync {
    /// A human-readable name (e.g., "relay", "openai").
    fn name(&self) -> &str;

    /// Ask one question. No retries happen here.
    async fn ask(&self, message: &str) -> std::result::Result<String, GatewayError>;
}

/// Reject blank questions before any network attempt.
pub fn require_message(message: &str) -> std::result::Result<&str, GatewayError> {
    if message.trim().is_empty() {
        Err(GatewayError::BadRequest("Message is required".into()))
    } else {
        Ok(message)
    }
}
