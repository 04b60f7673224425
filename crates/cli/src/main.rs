//! Webrag CLI
//!
//! Main entry point for the webrag command-line tool. Ingests web
//! pages into a vector store and answers questions from them.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand};
use std::path::PathBuf;
use webrag_core::{config::AppConfig, logging, AppResult};

/// Webrag CLI - ingest web pages and ask questions about them
#[derive(Parser, Debug)]
#[command(name = "webrag")]
#[command(about = "Ingest web pages into a vector store and ask questions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "WEBRAG_CONFIG")]
    config: Option<PathBuf>,

    /// Generation provider (openai, ollama)
    #[arg(short, long, global = true, env = "WEBRAG_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "WEBRAG_MODEL")]
    model: Option<String>,

    /// Vector store base URL (host and port)
    #[arg(long, global = true, env = "WEBRAG_STORE_URL")]
    store_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a web page and store it in the vector store
    Ingest(IngestCommand),

    /// Ask a question against the ingested pages
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.provider,
        cli.model,
        cli.store_url,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Webrag CLI starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Store: {}", config.store_url);

    let command_name = match &cli.command {
        Commands::Ingest(_) => "ingest",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
