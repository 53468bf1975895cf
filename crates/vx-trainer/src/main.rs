//! vx-trainer: conversation trainer main binary
//!
//! Serves the practice-session HTTP API.
//!
//! Usage:
//!   vx-trainer            - Start the HTTP server
//!   vx-trainer --help     - Show help
//!   vx-trainer --version  - Show version

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vx_api::AppState;
use vx_core::{Config, DialogueEngine, InMemorySessionStore, PlaceholderTranscriber, RandomSelector, SessionManager};

/// Run mode
enum RunMode {
    /// Serve the HTTP API
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("vx-trainer {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration: file, then environment overrides
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting vx-trainer...");

    run_server(config).await
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("vx-trainer - vaccine conversation practice server");
    println!();
    println!("Usage:");
    println!("  vx-trainer            Start the HTTP server");
    println!("  vx-trainer --help     Show this help message");
    println!("  vx-trainer --version  Show version");
    println!();
    println!("Configuration is read from {} when present.", vx_core::config::CONFIG_FILE);
    println!();
    println!("Environment Variables:");
    println!("  LLM_API_KEY              Generation API key (OPENAI_API_KEY also accepted; optional)");
    println!("  LLM_MODEL                Model name (default depends on provider)");
    println!("  LLM_PROVIDER             Provider: openai or claude (default: openai)");
    println!("  LLM_BASE_URL             Custom API endpoint");
    println!("  LLM_TIMEOUT_SECS         Generation request timeout (default: 30)");
    println!("  API_PORT                 HTTP port (default: 5000)");
    println!("  API_ALLOWED_ORIGINS      Comma-separated CORS origins (default: any)");
    println!("  STATIC_DIR               Directory of frontend files to serve");
    println!("  DIALOGUE_HISTORY_WINDOW  Prior turns sent for generated replies (default: 4)");
}

/// Build the services and serve until Ctrl+C
async fn run_server(config: Config) -> anyhow::Result<()> {
    let engine = DialogueEngine::from_config(&config, Arc::new(RandomSelector))
        .map_err(|e| anyhow::anyhow!("Failed to create dialogue engine: {}", e))?;
    tracing::info!("Reply strategy: {}", engine.strategy_name());

    let session_manager = SessionManager::new(Arc::new(InMemorySessionStore::new()), engine);
    let state = AppState::new(session_manager, Arc::new(PlaceholderTranscriber));

    tracing::info!("Press Ctrl+C to exit");

    vx_api::start_server(state, &config.api, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
