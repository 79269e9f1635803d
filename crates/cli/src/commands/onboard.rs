//! `cileles onboard`: Write a default config file.

use cileles_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("💧 Cileles: First-Time Setup");
    println!("=============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("  Config file exists, leaving it alone: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created {}", config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. export OPENAI_API_KEY=sk-...");
    println!("  2. cileles serve            (chat endpoint on 127.0.0.1:8787)");
    println!("  3. cileles chat             (ask about pH, TDS, EC, stations)");
    println!();

    Ok(())
}
