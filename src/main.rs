use barque::cli::{Cli, Commands};
use barque::config::settings::LoggingSettings;
use barque::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is an agent concern
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_settings = LoggingSettings {
        file_enabled: false,
        ..LoggingSettings::default()
    };
    let _guard = match init_logging(log_level, &logging_settings) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Config(args) => args.execute(&cli.settings).await,
    }
}
