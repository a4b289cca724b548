//! CMS Architect CLI binary.
//!
//! This binary provides command-line access to CMS Architect:
//! - Launch the terminal UI (default)
//! - Generate an architecture as JSON
//! - Ask the architect a single question

use clap::Parser;
use cms_architect::cli::{Cli, Commands, launch_tui, run_chat, run_generate};
use cms_architect::observability::{LogTarget, ObservabilityConfig, init_observability_with_config};
use cms_architect::{ArchitectConfig, GeminiClient, Metadata, ResponseGateway};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading API keys
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let command = cli.command();
    let config = ArchitectConfig::load_with(cli.config.as_deref())?;

    // Initialize tracing
    let target = match command {
        Commands::Tui => LogTarget::File(config.logging.log_file()),
        Commands::Generate { .. } | Commands::Chat { .. } => LogTarget::Stderr,
    };
    let mut observability = ObservabilityConfig::from_logging(&config.logging, target);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let client = GeminiClient::from_config(&config.provider)?;
    if !client.has_api_key() {
        tracing::warn!(
            vars = ?config.provider.api_key_vars,
            "No API key found; every request will fail until one is set"
        );
    }
    tracing::debug!(metadata = ?client.metadata(), "Provider ready");
    let gateway = ResponseGateway::from_config(Arc::new(client), &config);

    // Execute the requested command
    match command {
        Commands::Tui => launch_tui(gateway, &config).await?,
        Commands::Generate {
            requirements,
            compact,
        } => run_generate(&gateway, &requirements, compact).await?,
        Commands::Chat { message } => run_chat(&gateway, &message).await?,
    }

    Ok(())
}
