//! Configuration loading, validation, and management for Cileles.
//!
//! Loads configuration from `~/.cileles/config.toml` with environment
//! variable overrides. Validates all settings at startup and resolves the
//! assistant deployment target exactly once.

pub mod prompt;

pub use prompt::{DOMAIN_PROMPT, DomainPrompt};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.cileles/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which assistant endpoint answers questions
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// The OpenAI-compatible backend used by `direct` mode and by the gateway
    #[serde(default)]
    pub backend: BackendConfig,

    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Monitoring data source
    #[serde(default)]
    pub data: DataConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

/// Where assistant questions are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    /// The local development function endpoint
    Local,
    /// The deployed chat endpoint
    #[default]
    Production,
    /// Call the language model in-process
    Direct,
    /// Never touch the network
    Offline,
}

impl std::str::FromStr for DeploymentTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" => Ok(Self::Local),
            "production" | "prod" => Ok(Self::Production),
            "direct" => Ok(Self::Direct),
            "offline" | "demo" => Ok(Self::Offline),
            other => Err(ConfigError::ValidationError(format!(
                "unknown assistant target '{other}' (expected local, production, direct, or offline)"
            ))),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub target: DeploymentTarget,

    #[serde(default = "default_local_endpoint")]
    pub local_endpoint: String,

    #[serde(default = "default_production_endpoint")]
    pub production_endpoint: String,

    /// Optional bearer credential for the relay endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Caller-side bound on one assistant round trip
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_local_endpoint() -> String {
    "http://localhost:8888/.netlify/functions/chat".into()
}
fn default_production_endpoint() -> String {
    "http://127.0.0.1:8787/api/chat".into()
}
fn default_timeout_secs() -> u64 {
    20
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            target: DeploymentTarget::default(),
            local_endpoint: default_local_endpoint(),
            production_endpoint: default_production_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("target", &self.target)
            .field("local_endpoint", &self.local_endpoint)
            .field("production_endpoint", &self.production_endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Language-model credential; normally supplied through the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    500
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// TSV snapshot to load instead of the bundled one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// The assistant endpoint chosen at startup.
#[derive(Clone, PartialEq)]
pub enum ResolvedBackend {
    /// A deployed chat endpoint speaking `{"message"}` in and out
    Relay {
        endpoint: String,
        credential: Option<String>,
    },
    /// The language model itself
    Direct(BackendSettings),
    /// No backend at all
    Offline,
}

/// Everything needed to call the language model directly.
#[derive(Clone, PartialEq)]
pub struct BackendSettings {
    pub api_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ResolvedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relay {
                endpoint,
                credential,
            } => f
                .debug_struct("Relay")
                .field("endpoint", endpoint)
                .field("credential", &redact(credential))
                .finish(),
            Self::Direct(settings) => f.debug_tuple("Direct").field(settings).finish(),
            Self::Offline => f.write_str("Offline"),
        }
    }
}

impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.cileles/config.toml).
    ///
    /// Then applies environment overrides:
    /// - `CILELES_API_KEY`, then `OPENAI_API_KEY` → `backend.api_key`
    /// - `CILELES_TARGET` → `assistant.target`
    /// - `CILELES_ENDPOINT` → `assistant.production_endpoint`
    /// - `CILELES_DATA` → `data.path`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.backend.api_key.is_none() {
            self.backend.api_key = non_empty("CILELES_API_KEY").or_else(|| non_empty("OPENAI_API_KEY"));
        }

        if let Some(target) = non_empty("CILELES_TARGET") {
            self.assistant.target = target.parse()?;
        }

        if let Some(endpoint) = non_empty("CILELES_ENDPOINT") {
            self.assistant.production_endpoint = endpoint;
        }

        if let Some(path) = non_empty("CILELES_DATA") {
            self.data.path = Some(PathBuf::from(path));
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".cileles")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            return Err(ConfigError::ValidationError(
                "backend.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.backend.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "backend.max_tokens must be > 0".into(),
            ));
        }

        if self.assistant.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.timeout_secs must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if a language-model credential is available.
    pub fn has_api_key(&self) -> bool {
        self.backend.api_key.is_some()
    }

    /// Settings for calling the language model directly.
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            api_url: self.backend.api_url.clone(),
            model: self.backend.model.clone(),
            temperature: self.backend.temperature,
            max_tokens: self.backend.max_tokens,
            api_key: self.backend.api_key.clone(),
        }
    }

    /// Decide the assistant endpoint. Call once at startup.
    pub fn resolve_backend(&self) -> ResolvedBackend {
        match self.assistant.target {
            DeploymentTarget::Local => ResolvedBackend::Relay {
                endpoint: self.assistant.local_endpoint.clone(),
                credential: self.assistant.api_key.clone(),
            },
            DeploymentTarget::Production => ResolvedBackend::Relay {
                endpoint: self.assistant.production_endpoint.clone(),
                credential: self.assistant.api_key.clone(),
            },
            DeploymentTarget::Direct => ResolvedBackend::Direct(self.backend_settings()),
            DeploymentTarget::Offline => ResolvedBackend::Offline,
        }
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
