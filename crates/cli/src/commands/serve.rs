//! `cileles serve`: Start the HTTP chat endpoint.

use std::path::PathBuf;

pub async fn run(
    data: Option<PathBuf>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(data)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("💧 Cileles Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.backend.model);
    println!(
        "   API key:   {}",
        if config.has_api_key() { "configured" } else { "missing (chat will return 500)" }
    );

    cileles_gateway::start(config).await?;

    Ok(())
}
