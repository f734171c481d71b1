// Redline - PII detection and document redaction engine
// Copyright (c) 2025 Redline Contributors
// Licensed under the MIT License

use clap::Parser;
use redline::cli::commands::EXIT_FATAL;
use redline::cli::{Cli, Commands};
use redline::config::LoggingConfig;
use redline::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; stdout carries command output
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let guard = match init_logging(log_level, &LoggingConfig::default()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Redline - PII detection and document redaction"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            redline::log_error_with_context!(e, "Command execution failed");
            eprintln!("Error: {e:#}");
            EXIT_FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Scan(args) => args.execute(&cli.config).await,
        Commands::Locate(args) => args.execute(&cli.config).await,
        Commands::Mask(args) => args.execute(&cli.config).await,
        Commands::MapRegion(args) => args.execute(&cli.config).await,
        Commands::Cells(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
