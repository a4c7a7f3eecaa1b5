//! CLI command definitions and dispatch.

pub mod receive;
pub mod recipients;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use pushgate_core::config::AppConfig;
use pushgate_core::config::hooks::InterpreterKind;
use pushgate_core::AppResult;
use pushgate_hooks::{HookOrchestrator, HookPhase, ProcessInterpreter, ScriptInterpreter, scripts};

use crate::facade::ConfigFacade;

/// PushGate — push hook runner for Git hosting
#[derive(Debug, Parser)]
#[command(name = "pushgate", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the pre-receive chain on ref updates read from stdin
    PreReceive(receive::ReceiveArgs),
    /// Run the post-receive chain on ref updates read from stdin
    PostReceive(receive::ReceiveArgs),
    /// Print the notification recipients for a repository
    Recipients(recipients::RecipientsArgs),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub async fn execute(&self, config: &AppConfig) -> AppResult<i32> {
        match &self.command {
            Commands::PreReceive(args) => {
                receive::execute(args, HookPhase::PreReceive, config).await
            }
            Commands::PostReceive(args) => {
                receive::execute(args, HookPhase::PostReceive, config).await
            }
            Commands::Recipients(args) => recipients::execute(args, config).await,
        }
    }
}

/// Helper: build the facade and orchestrator from configuration
pub fn build_orchestrator(config: &AppConfig) -> (Arc<ConfigFacade>, HookOrchestrator) {
    let facade = Arc::new(ConfigFacade::new(config));
    let interpreter: Arc<dyn ScriptInterpreter> = match config.hooks.interpreter {
        InterpreterKind::Native => Arc::new(scripts::bundled()),
        InterpreterKind::Process => Arc::new(ProcessInterpreter::new()),
    };
    tracing::debug!(
        interpreter = %interpreter.name(),
        script_directory = %config.hooks.script_directory,
        "Hook runtime configured"
    );
    let orchestrator = HookOrchestrator::from_config(&config.hooks, facade.clone(), interpreter);
    (facade, orchestrator)
}
