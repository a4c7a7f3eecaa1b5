//! PushGate — push hook runner for Git hosting.
//!
//! Installed as a repository's `pre-receive` / `post-receive` hook, it reads
//! the ref updates from stdin and runs the configured hook chain.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pushgate_core::config::AppConfig;

mod commands;
mod facade;
mod mail;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env = std::env::var("PUSHGATE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&cli.config, &env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    match cli.execute(&config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Hook run failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing/logging; stdout stays reserved for hook output
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
