//! OpenAI-compatible backend.
//!
//! Calls `/chat/completions` on OpenAI or any endpoint exposing the same
//! API. Each question becomes a two-message conversation: the fixed domain
//! prompt as the system message, then the user's question. Non-streaming.

use async_trait::async_trait;
use cileles_config::{BackendSettings, DOMAIN_PROMPT};
use cileles_core::backend::require_message;
use cileles_core::error::EMPTY_ANSWER_FALLBACK;
use cileles_core::{Backend, Error, GatewayError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An OpenAI-compatible language-model backend.
pub struct OpenAiCompatBackend {
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiCompatBackend {
    /// Create a backend from resolved settings.
    pub fn new(settings: &BackendSettings) -> cileles_core::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            client,
        })
    }

    /// OpenAI with the stock model settings (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> cileles_core::Result<Self> {
        Self::new(&BackendSettings {
            api_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            max_tokens: 500,
            api_key: Some(api_key.into()),
        })
    }

    fn request_body<'a>(&'a self, message: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages: [
                ApiMessage {
                    role: "system",
                    content: DOMAIN_PROMPT.text,
                },
                ApiMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl Backend for OpenAiCompatBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn ask(&self, message: &str) -> std::result::Result<String, GatewayError> {
        let message = require_message(message)?;
        let Some(api_key) = &self.api_key else {
            return Err(GatewayError::CredentialNotConfigured);
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, prompt_version = DOMAIN_PROMPT.version, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(message))
            .send()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Backend returned error");
            return Err(GatewayError::from_status(
                status.as_u16(),
                Some(format!("OpenAI API error: {reason}")),
            ));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(format!("Failed to parse response: {e}")))?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| EMPTY_ANSWER_FALLBACK.to_string()))
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cileles_core::GatewayErrorKind;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(api_url: &str, api_key: Option<&str>) -> BackendSettings {
        BackendSettings {
            api_url: api_url.into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            max_tokens: 500,
            api_key: api_key.map(String::from),
        }
    }

    #[test]
    fn openai_constructor() {
        let backend = OpenAiCompatBackend::openai("sk-test").unwrap();
        assert_eq!(backend.name(), "openai");
        assert!(backend.base_url.contains("api.openai.com"));
        assert_eq!(backend.max_tokens, 500);
    }

    #[test]
    fn request_carries_domain_prompt_first() {
        let backend = OpenAiCompatBackend::openai("sk-test").unwrap();
        let body = serde_json::to_value(backend.request_body("apa itu TDS?")).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], DOMAIN_PROMPT.text);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "apa itu TDS?");
    }

    #[tokio::test]
    async fn missing_credential_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let backend = OpenAiCompatBackend::new(&settings(&server.uri(), None)).unwrap();
        let err = backend.ask("halo").await.unwrap_err();
        assert_eq!(err, GatewayError::CredentialNotConfigured);
    }

    #[tokio::test]
    async fn first_choice_is_the_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "pH normal 6.5-8.5"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend =
            OpenAiCompatBackend::new(&settings(&format!("{}/v1/", server.uri()), Some("sk-test")))
                .unwrap();
        assert_eq!(backend.ask("pH?").await.unwrap(), "pH normal 6.5-8.5");
    }

    #[tokio::test]
    async fn empty_choices_yield_fallback_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let backend =
            OpenAiCompatBackend::new(&settings(&server.uri(), Some("sk-test"))).unwrap();
        assert_eq!(backend.ask("halo").await.unwrap(), EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn empty_content_yields_fallback_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": ""}}]
            })))
            .mount(&server)
            .await;

        let backend =
            OpenAiCompatBackend::new(&settings(&server.uri(), Some("sk-test"))).unwrap();
        assert_eq!(backend.ask("halo").await.unwrap(), EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn statuses_are_classified() {
        for (status, kind) in [
            (401, GatewayErrorKind::Unauthorized),
            (429, GatewayErrorKind::RateLimited),
            (403, GatewayErrorKind::Forbidden),
            (500, GatewayErrorKind::UpstreamUnavailable),
            (404, GatewayErrorKind::Unknown),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let backend =
                OpenAiCompatBackend::new(&settings(&server.uri(), Some("sk-test"))).unwrap();
            let err = backend.ask("halo").await.unwrap_err();
            assert_eq!(err.kind(), kind, "status {status}");
        }
    }

    #[tokio::test]
    async fn unknown_status_carries_reason_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"error\":{}}"))
            .mount(&server)
            .await;

        let backend =
            OpenAiCompatBackend::new(&settings(&server.uri(), Some("sk-test"))).unwrap();
        let err = backend.ask("halo").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Unknown {
                status: 400,
                message: Some("OpenAI API error: Bad Request".into()),
            }
        );
    }
}
