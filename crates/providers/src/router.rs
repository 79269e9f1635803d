//! Backend router: builds the assistant backend from configuration.
//!
//! The deployment target is resolved once at startup; nothing downstream
//! branches on it again.

use cileles_config::{AppConfig, ResolvedBackend};
use cileles_core::Backend;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::fallback::FallbackAssistant;
use crate::openai_compat::OpenAiCompatBackend;
use crate::relay::RelayGateway;

/// Build the live backend for a resolved target. `None` means offline only.
pub fn build_backend(
    resolved: &ResolvedBackend,
) -> cileles_core::Result<Option<Arc<dyn Backend>>> {
    let backend: Option<Arc<dyn Backend>> = match resolved {
        ResolvedBackend::Relay {
            endpoint,
            credential,
        } => {
            info!(endpoint = %endpoint, "Using relay backend");
            let relay: Arc<dyn Backend> =
                Arc::new(RelayGateway::new(endpoint.as_str(), credential.clone())?);
            Some(relay)
        }
        ResolvedBackend::Direct(settings) => {
            info!(api_url = %settings.api_url, model = %settings.model, "Using direct backend");
            let direct: Arc<dyn Backend> = Arc::new(OpenAiCompatBackend::new(settings)?);
            Some(direct)
        }
        ResolvedBackend::Offline => {
            info!("Using offline responder only");
            None
        }
    };
    Ok(backend)
}

/// Build the assistant the CLI talks to.
pub fn build_assistant(config: &AppConfig) -> cileles_core::Result<FallbackAssistant> {
    let backend = build_backend(&config.resolve_backend())?;
    Ok(FallbackAssistant::new(backend)
        .with_timeout(Duration::from_secs(config.assistant.timeout_secs)))
}
