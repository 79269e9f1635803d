//! Assistant backends for Cileles.
//!
//! All live backends implement `cileles_core::Backend`. The router builds
//! the right one from configuration and wraps it in a [`FallbackAssistant`]
//! so an unreachable backend degrades to the offline responder.

pub mod fallback;
pub mod offline;
pub mod openai_compat;
pub mod relay;
pub mod router;

pub use fallback::{AssistantSession, FallbackAssistant};
pub use openai_compat::OpenAiCompatBackend;
pub use relay::RelayGateway;
pub use router::{build_assistant, build_backend};
