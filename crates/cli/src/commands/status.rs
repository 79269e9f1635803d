//! `cileles status`: Show the effective configuration.

use cileles_config::{AppConfig, DOMAIN_PROMPT, ResolvedBackend};
use std::path::PathBuf;

pub async fn run(data: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(data)?;

    let assistant = match config.resolve_backend() {
        ResolvedBackend::Relay { endpoint, .. } => format!("relay → {endpoint}"),
        ResolvedBackend::Direct(settings) => format!("direct → {}", settings.api_url),
        ResolvedBackend::Offline => "offline responder only".to_string(),
    };

    println!("💧 Cileles Status");
    println!("=================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Assistant:    {assistant}");
    println!("  Timeout:      {}s", config.assistant.timeout_secs);
    println!("  Model:        {}", config.backend.model);
    println!("  Temperature:  {}", config.backend.temperature);
    println!("  API key:      {}", if config.has_api_key() { "configured" } else { "missing" });
    println!("  Prompt:       v{}", DOMAIN_PROMPT.version);
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!("  Data:         {}", data_source(&config));

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file: run `cileles onboard` first");
    }

    Ok(())
}

fn data_source(config: &AppConfig) -> String {
    config
        .data
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled snapshot".into())
}
