//! Chat exchange domain types.
//!
//! One exchange is created per user message:
//! User asks → gateway or offline responder answers → exchange is recorded in the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GatewayErrorKind;

/// Where the response text of an exchange came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum AnswerSource {
    /// The live language-model backend
    Live,
    /// The deterministic offline responder
    Offline,
    /// A classified gateway failure rendered as user-facing text
    Failed(GatewayErrorKind),
}

/// A user message paired with its response. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    /// Unique exchange ID
    pub id: String,

    /// What the user asked
    pub user_message: String,

    /// What the user is shown
    pub response: String,

    /// Which path produced the response
    pub source: AnswerSource,

    /// When the response was produced
    pub timestamp: DateTime<Utc>,
}

impl ChatExchange {
    pub fn new(
        user_message: impl Into<String>,
        response: impl Into<String>,
        source: AnswerSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_message: user_message.into(),
            response: response.into(),
            source,
            timestamp: Utc::now(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.source == AnswerSource::Offline
    }
}

/// The exchanges of the current session, oldest first. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    exchanges: Vec<ChatExchange>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, exchange: ChatExchange) {
        self.exchanges.push(exchange);
    }

    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    pub fn last(&self) -> Option<&ChatExchange> {
        self.exchanges.last()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_exchange() {
        let ex = ChatExchange::new("Apa itu pH?", "pH adalah ...", AnswerSource::Live);
        assert_eq!(ex.user_message, "Apa itu pH?");
        assert!(!ex.is_offline());
        assert!(!ex.id.is_empty());
    }

    #[test]
    fn transcript_keeps_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        transcript.push(ChatExchange::new("a", "1", AnswerSource::Offline));
        transcript.push(ChatExchange::new("b", "2", AnswerSource::Live));
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.exchanges()[0].user_message, "a");
        assert_eq!(transcript.last().unwrap().user_message, "b");
    }

    #[test]
    fn source_serialization() {
        let json = serde_json::to_string(&AnswerSource::Failed(GatewayErrorKind::RateLimited)).unwrap();
        assert_eq!(json, r#"{"type":"failed","kind":"rate-limited"}"#);
        let json = serde_json::to_string(&AnswerSource::Offline).unwrap();
        assert_eq!(json, r#"{"type":"offline"}"#);
    }
}
