pub mod chat;
pub mod onboard;
pub mod serve;
pub mod stations;
pub mod status;

use cileles_config::AppConfig;
use std::path::PathBuf;

/// Load config and apply the command-line data override.
pub fn load_config(data: Option<PathBuf>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(with_data_override(config, data))
}

fn with_data_override(mut config: AppConfig, data: Option<PathBuf>) -> AppConfig {
    if data.is_some() {
        config.data.path = data;
    }
    config
}
