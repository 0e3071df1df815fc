use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_gateway::ai::{AiBackend, GeminiBackend};
use rift_gateway::api::{build_router, state::AppState};
use rift_gateway::catalog::CatalogClient;
use rift_gateway::config::AppConfig;
use rift_gateway::riot::RiotClient;

#[derive(Parser)]
#[command(name = "rift-gateway")]
#[command(about = "League of Legends data gateway with heuristic match analysis")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration file and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early so the log level default can come from it
    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting rift-gateway v{}", env!("CARGO_PKG_VERSION"));
    if !config_path.exists() {
        tracing::warn!(
            "Config file {} not found, using defaults",
            config_path.display()
        );
    }

    match cli.command {
        Commands::Serve { host, port } => {
            let riot_api_key = std::env::var(&config.riot.api_key_env).unwrap_or_default();
            if riot_api_key.is_empty() {
                tracing::warn!("{} is not properly configured", config.riot.api_key_env);
            }
            let gemini_api_key = std::env::var(&config.ai.api_key_env).unwrap_or_default();
            if gemini_api_key.is_empty() {
                tracing::warn!("{} is not properly configured", config.ai.api_key_env);
            }

            let riot = RiotClient::new(
                riot_api_key,
                Duration::from_secs(config.riot.timeout_seconds),
            )?;
            let catalog = CatalogClient::new(config.catalog.clone())?;
            let ai: Arc<dyn AiBackend> = Arc::new(GeminiBackend::new(
                config.ai.base_url.clone(),
                gemini_api_key,
            ));

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                config: Arc::new(config),
                riot: Arc::new(riot),
                catalog: Arc::new(catalog),
                ai,
            };
            let app = build_router(state);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Gateway listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::CheckConfig => {
            config.validate()?;
            println!("Configuration OK ({})", config_path.display());
        }
    }

    Ok(())
}
