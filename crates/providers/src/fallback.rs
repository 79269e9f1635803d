//! Assistant fallback: live backend first, offline responder on failure.
//!
//! When the backend is unreachable (transport failure, 5xx, timeout, or no
//! credential) the question is answered by the offline responder instead.
//! Other classified failures are shown to the user as-is.

use cileles_core::message::{AnswerSource, ChatExchange, Transcript};
use cileles_core::{Backend, GatewayError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::offline;

/// Default caller-side bound on one backend round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Answers every question, one way or another.
pub struct FallbackAssistant {
    backend: Option<Arc<dyn Backend>>,
    timeout: Duration,
}

impl FallbackAssistant {
    /// Create an assistant over an optional live backend.
    pub fn new(backend: Option<Arc<dyn Backend>>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// An assistant that only ever answers offline.
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Override the caller-side timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.as_ref().map(|b| b.name()).unwrap_or("offline")
    }

    /// Ask the live backend, bounded by the configured timeout.
    async fn ask_live(
        &self,
        backend: &dyn Backend,
        message: &str,
    ) -> std::result::Result<String, GatewayError> {
        match tokio::time::timeout(self.timeout, backend.ask(message)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    backend = backend.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Backend timed out"
                );
                Err(GatewayError::UpstreamUnavailable(format!(
                    "backend '{}' timed out after {}s",
                    backend.name(),
                    self.timeout.as_secs()
                )))
            }
        }
    }

    /// Produce an exchange for `message`. Never fails.
    pub async fn answer(&self, message: &str) -> ChatExchange {
        let Some(backend) = &self.backend else {
            return ChatExchange::new(message, offline::respond(message), AnswerSource::Offline);
        };

        match self.ask_live(backend.as_ref(), message).await {
            Ok(text) => ChatExchange::new(message, text, AnswerSource::Live),
            Err(e) if e.wants_offline_fallback() => {
                info!(backend = backend.name(), error = %e, "Falling back to offline answers");
                ChatExchange::new(message, offline::respond(message), AnswerSource::Offline)
            }
            Err(e) => {
                warn!(backend = backend.name(), kind = %e.kind(), "Backend failed");
                ChatExchange::new(message, e.user_message(), AnswerSource::Failed(e.kind()))
            }
        }
    }
}

/// One conversation: sends are serialized and every exchange is kept.
pub struct AssistantSession {
    assistant: FallbackAssistant,
    transcript: Transcript,
}

impl AssistantSession {
    pub fn new(assistant: FallbackAssistant) -> Self {
        Self {
            assistant,
            transcript: Transcript::new(),
        }
    }

    /// Send one message. Blank input is ignored and records nothing.
    pub async fn send(&mut self, message: &str) -> Option<&ChatExchange> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let exchange = self.assistant.answer(message).await;
        self.transcript.push(exchange);
        self.transcript.last()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn assistant(&self) -> &FallbackAssistant {
        &self.assistant
    }
}
