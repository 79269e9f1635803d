//! Error types for the Cileles domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer substituted when a backend replies successfully but without text.
pub const EMPTY_ANSWER_FALLBACK: &str = "Maaf, tidak ada respons.";

/// Generic user-facing text for failures that carry no better explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Maaf, terjadi kesalahan. Silakan coba lagi.";

/// The top-level error type for all Cileles operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Ingestion errors ---
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    // --- Assistant gateway errors ---
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// The source has no header plus data rows to work with.
    #[error("Malformed source: expected a header and at least one data row, found {lines} line(s)")]
    MalformedSource { lines: usize },

    /// The source file could not be read at all.
    #[error("Cannot read monitoring source {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// A single data row could not be turned into a record.
    #[error("Record rejected at line {line}: {reason}")]
    RecordRejected { line: usize, reason: String },
}

/// A classified assistant backend failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Backend rejected the credential")]
    Unauthorized,

    #[error("Backend rate limit reached")]
    RateLimited,

    #[error("Backend refused access")]
    Forbidden,

    #[error("Backend unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Backend error (status: {status})")]
    Unknown {
        status: u16,
        message: Option<String>,
    },

    #[error("credential not configured")]
    CredentialNotConfigured,
}

/// The kind of a [`GatewayError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatewayErrorKind {
    Unauthorized,
    RateLimited,
    Forbidden,
    UpstreamUnavailable,
    BadRequest,
    Unknown,
    CredentialNotConfigured,
}

impl GatewayErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate-limited",
            Self::Forbidden => "forbidden",
            Self::UpstreamUnavailable => "upstream-unavailable",
            Self::BadRequest => "bad-request",
            Self::Unknown => "unknown",
            Self::CredentialNotConfigured => "credential-not-configured",
        }
    }
}

impl std::fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GatewayError {
    /// Classify a non-2xx HTTP status returned by an assistant backend.
    ///
    /// `error_text` is the backend's own error description, kept only for
    /// statuses that have no dedicated variant.
    pub fn from_status(status: u16, error_text: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            429 => Self::RateLimited,
            403 => Self::Forbidden,
            s if s >= 500 => Self::UpstreamUnavailable(format!("backend returned status {s}")),
            s => Self::Unknown {
                status: s,
                message: error_text.filter(|t| !t.trim().is_empty()),
            },
        }
    }

    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::Unauthorized => GatewayErrorKind::Unauthorized,
            Self::RateLimited => GatewayErrorKind::RateLimited,
            Self::Forbidden => GatewayErrorKind::Forbidden,
            Self::UpstreamUnavailable(_) => GatewayErrorKind::UpstreamUnavailable,
            Self::BadRequest(_) => GatewayErrorKind::BadRequest,
            Self::Unknown { .. } => GatewayErrorKind::Unknown,
            Self::CredentialNotConfigured => GatewayErrorKind::CredentialNotConfigured,
        }
    }

    /// Whether the caller should answer from the offline responder instead
    /// of surfacing this failure.
    pub fn wants_offline_fallback(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_) | Self::CredentialNotConfigured
        )
    }

    /// Text safe to show an end user. Never includes transport details.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => {
                "❌ API key tidak valid. Hubungi administrator untuk memeriksa konfigurasi.".into()
            }
            Self::RateLimited => {
                "⏳ Terlalu banyak permintaan. Silakan tunggu sebentar dan coba lagi.".into()
            }
            Self::Forbidden => {
                "🚫 Akses ditolak. Pastikan akun OpenAI memiliki kredit yang cukup.".into()
            }
            Self::BadRequest(_) => "Pesan tidak boleh kosong.".into(),
            Self::Unknown {
                message: Some(text),
                ..
            } => text.clone(),
            Self::Unknown { message: None, .. }
            | Self::UpstreamUnavailable(_)
            | Self::CredentialNotConfigured => GENERIC_FAILURE_MESSAGE.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_is_exact() {
        assert_eq!(GatewayError::from_status(401, None), GatewayError::Unauthorized);
        assert_eq!(GatewayError::from_status(429, None), GatewayError::RateLimited);
        assert_eq!(GatewayError::from_status(403, None), GatewayError::Forbidden);
        assert_eq!(
            GatewayError::from_status(500, None).kind(),
            GatewayErrorKind::UpstreamUnavailable
        );
        assert_eq!(
            GatewayError::from_status(503, Some("down".into())).kind(),
            GatewayErrorKind::UpstreamUnavailable
        );
        assert_eq!(
            GatewayError::from_status(404, Some("no route".into())),
            GatewayError::Unknown {
                status: 404,
                message: Some("no route".into())
            }
        );
        assert_eq!(
            GatewayError::from_status(400, None).kind(),
            GatewayErrorKind::Unknown
        );
    }

    #[test]
    fn blank_error_text_is_dropped() {
        let err = GatewayError::from_status(418, Some("   ".into()));
        assert_eq!(
            err,
            GatewayError::Unknown {
                status: 418,
                message: None
            }
        );
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn only_unreachable_backends_trigger_offline() {
        assert!(GatewayError::UpstreamUnavailable("refused".into()).wants_offline_fallback());
        assert!(GatewayError::CredentialNotConfigured.wants_offline_fallback());
        assert!(!GatewayError::RateLimited.wants_offline_fallback());
        assert!(!GatewayError::Unauthorized.wants_offline_fallback());
        assert!(!GatewayError::BadRequest("empty".into()).wants_offline_fallback());
    }

    #[test]
    fn user_messages_do_not_leak_transport_details() {
        let err = GatewayError::UpstreamUnavailable("dns error: lookup api.internal".into());
        assert!(!err.user_message().contains("dns"));
        assert!(GatewayError::RateLimited.user_message().contains("Terlalu banyak"));
    }

    #[test]
    fn kind_strings() {
        assert_eq!(GatewayErrorKind::RateLimited.as_str(), "rate-limited");
        assert_eq!(
            serde_json::to_string(&GatewayErrorKind::UpstreamUnavailable).unwrap(),
            "\"upstream-unavailable\""
        );
        assert_eq!(
            GatewayError::CredentialNotConfigured.to_string(),
            "credential not configured"
        );
    }

    #[test]
    fn ingest_error_displays_correctly() {
        let err = Error::Ingest(IngestError::RecordRejected {
            line: 4,
            reason: "pH is not a number".into(),
        });
        assert!(err.to_string().contains("line 4"));
        assert!(err.to_string().contains("pH"));
    }
}
