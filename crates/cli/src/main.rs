//! Cileles CLI: the main entry point.
//!
//! Commands:
//! - `onboard`: Write a default config file
//! - `stations`: Show the monitoring snapshot with quality tiers
//! - `chat`: Ask the water-quality assistant (interactive or single message)
//! - `serve`: Start the HTTP chat endpoint
//! - `status`: Show the effective configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "cileles",
    about = "Cileles: water quality monitoring for Cileles, Jatinangor",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Monitoring snapshot to load instead of the configured one
    #[arg(long, global = true, env = "CILELES_DATA")]
    data: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Show monitoring stations and their quality tiers
    Stations {
        /// Show map marker status (pH only) instead of the table badge
        #[arg(long)]
        map: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Chat with the water-quality assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Override the assistant target (local, production, direct, offline)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Start the HTTP chat endpoint
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let data = cli.data;
    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Stations { map, json } => commands::stations::run(data, map, json).await?,
        Commands::Chat { message, target } => commands::chat::run(data, message, target).await?,
        Commands::Serve { port } => commands::serve::run(data, port).await?,
        Commands::Status => commands::status::run(data).await?,
    }

    Ok(())
}
