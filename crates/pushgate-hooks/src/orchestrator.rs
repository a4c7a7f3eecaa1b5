//! Hook orchestrator — runs a chain of scripts for one push.
//!
//! Scripts run strictly in order against a single binding context:
//! - `Accept` and `NoOpinion` continue with the next script.
//! - `Reject` stops the chain, rejects every pending command and returns
//!   `HookAborted`.
//! - A missing or failing script is treated like `Reject`, but the
//!   underlying error is returned instead.
//!
//! Commands still pending after the last script are accepted, so no
//! command leaves the orchestrator in the "not processed" state.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use pushgate_core::config::hooks::HooksConfig;
use pushgate_entity::{CommandStatus, RefUpdateCommand, RepositoryModel, UserModel};

use crate::api::facade::ServiceFacade;
use crate::api::logger::{HookLogger, TracingHookLogger};
use crate::context::BindingContext;
use crate::error::HookError;
use crate::runtime::{HookOutcome, ScriptInterpreter, ScriptRuntime};

/// When a chain runs relative to the ref update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookPhase {
    /// Before refs are updated; a veto blocks the push.
    PreReceive,
    /// After refs are updated; used for notification.
    PostReceive,
}

impl HookPhase {
    /// Returns the phase name as used by Git.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreReceive => "pre-receive",
            Self::PostReceive => "post-receive",
        }
    }
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one chain run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChainState {
    /// Context built, no script started.
    Pending,
    /// The script at `script_index` is executing.
    Running {
        /// Position in the chain.
        script_index: usize,
    },
    /// Every command ended accepted.
    Accepted,
    /// Every command ended rejected.
    Rejected,
    /// Scripts rejected some commands and the chain accepted the rest.
    PartiallyRejected,
    /// The chain returned to its caller.
    Done,
}

impl ChainState {
    /// Derives the disposition from final command statuses.
    pub fn from_commands(commands: &[RefUpdateCommand]) -> Self {
        let rejected = commands
            .iter()
            .filter(|c| matches!(c.status(), CommandStatus::Rejected { .. }))
            .count();
        match rejected {
            0 => Self::Accepted,
            n if n == commands.len() => Self::Rejected,
            _ => Self::PartiallyRejected,
        }
    }
}

/// One executed script.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRun {
    /// Configured script name.
    pub script: String,
    /// Normalized result.
    pub outcome: HookOutcome,
    /// Wall time spent in the script.
    pub elapsed_ms: u64,
}

/// Summary of a chain that completed without a veto or failure.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    /// The phase that ran.
    pub phase: HookPhase,
    /// Final disposition of the commands.
    pub state: ChainState,
    /// Every script run, in order.
    pub scripts: Vec<ScriptRun>,
}

impl ChainReport {
    /// Number of scripts that ran.
    pub fn scripts_run(&self) -> usize {
        self.scripts.len()
    }
}

/// Runs hook chains for pushes.
#[derive(Clone)]
pub struct HookOrchestrator {
    runtime: ScriptRuntime,
    facade: Arc<dyn ServiceFacade>,
    pre_receive_scripts: Vec<String>,
    post_receive_scripts: Vec<String>,
    logger: Option<Arc<dyn HookLogger>>,
}

impl std::fmt::Debug for HookOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookOrchestrator")
            .field("runtime", &self.runtime)
            .field("pre_receive_scripts", &self.pre_receive_scripts)
            .field("post_receive_scripts", &self.post_receive_scripts)
            .finish()
    }
}

impl HookOrchestrator {
    /// Creates an orchestrator with no server-wide scripts.
    pub fn new(runtime: ScriptRuntime, facade: Arc<dyn ServiceFacade>) -> Self {
        Self {
            runtime,
            facade,
            pre_receive_scripts: Vec::new(),
            post_receive_scripts: Vec::new(),
            logger: None,
        }
    }

    /// Creates an orchestrator from the `[hooks]` configuration section.
    pub fn from_config(
        config: &HooksConfig,
        facade: Arc<dyn ServiceFacade>,
        interpreter: Arc<dyn ScriptInterpreter>,
    ) -> Self {
        Self::new(ScriptRuntime::from_config(config, interpreter), facade)
            .with_scripts(HookPhase::PreReceive, config.pre_receive_scripts.clone())
            .with_scripts(HookPhase::PostReceive, config.post_receive_scripts.clone())
    }

    /// Sets the server-wide scripts for `phase`.
    pub fn with_scripts<I, S>(mut self, phase: HookPhase, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scripts = scripts.into_iter().map(Into::into).collect();
        match phase {
            HookPhase::PreReceive => self.pre_receive_scripts = scripts,
            HookPhase::PostReceive => self.post_receive_scripts = scripts,
        }
        self
    }

    /// Binds `logger` as every script's `logger` instead of the tracing one.
    pub fn with_logger(mut self, logger: Arc<dyn HookLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The chain for `phase`: server-wide scripts, then the repository's,
    /// without duplicates.
    pub fn scripts_for(&self, phase: HookPhase, repository: &RepositoryModel) -> Vec<String> {
        let (server, own) = match phase {
            HookPhase::PreReceive => (&self.pre_receive_scripts, &repository.pre_receive_scripts),
            HookPhase::PostReceive => {
                (&self.post_receive_scripts, &repository.post_receive_scripts)
            }
        };

        let mut chain: Vec<String> = Vec::with_capacity(server.len() + own.len());
        for script in server.iter().chain(own.iter()) {
            if !chain.contains(script) {
                chain.push(script.clone());
            }
        }
        chain
    }

    /// Runs the configured chain for `phase`.
    pub async fn run_phase(
        &self,
        phase: HookPhase,
        repository: &RepositoryModel,
        user: &UserModel,
        url: &str,
        commands: &mut [RefUpdateCommand],
    ) -> Result<ChainReport, HookError> {
        let scripts = self.scripts_for(phase, repository);
        self.run_chain(phase, &scripts, repository, user, url, commands)
            .await
    }

    /// Runs `scripts` in order against one binding context.
    ///
    /// On return every command has a final status, whether or not the
    /// chain succeeded.
    pub async fn run_chain(
        &self,
        phase: HookPhase,
        scripts: &[String],
        repository: &RepositoryModel,
        user: &UserModel,
        url: &str,
        commands: &mut [RefUpdateCommand],
    ) -> Result<ChainReport, HookError> {
        let logger = self
            .logger
            .clone()
            .unwrap_or_else(|| Arc::new(TracingHookLogger::new(&repository.name)));
        let mut context =
            BindingContext::new(self.facade.clone(), repository, user, commands, url, logger);

        let mut state = ChainState::Pending;
        debug!(
            phase = %phase,
            repository = %repository.name,
            user = %user.username,
            scripts = scripts.len(),
            commands = context.commands().len(),
            state = ?state,
            "Running hook chain"
        );

        let mut runs = Vec::with_capacity(scripts.len());

        for (index, script) in scripts.iter().enumerate() {
            state = ChainState::Running {
                script_index: index,
            };
            debug!(phase = %phase, script = %script, state = ?state, "Starting hook script");

            let start = Instant::now();
            let result = self.runtime.run(script, &mut context).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(
                        phase = %phase,
                        repository = %repository.name,
                        script = %script,
                        elapsed_ms,
                        error = %err,
                        "Hook script failed"
                    );
                    reject_pending(context.commands_mut(), &err.to_string());
                    return Err(err);
                }
            };

            info!(
                phase = %phase,
                repository = %repository.name,
                script = %script,
                outcome = %outcome,
                elapsed_ms,
                "Hook script completed"
            );
            runs.push(ScriptRun {
                script: script.clone(),
                outcome,
                elapsed_ms,
            });

            if outcome == HookOutcome::Reject {
                let err = HookError::HookAborted {
                    script: script.clone(),
                };
                warn!(
                    phase = %phase,
                    repository = %repository.name,
                    script = %script,
                    "Hook script vetoed the push"
                );
                reject_pending(
                    context.commands_mut(),
                    &format!("hook script '{script}' rejected the push"),
                );
                return Err(err);
            }
        }

        for command in context.commands_mut() {
            command.accept();
        }

        let report = ChainReport {
            phase,
            state: ChainState::from_commands(context.commands()),
            scripts: runs,
        };

        info!(
            phase = %phase,
            repository = %repository.name,
            scripts_run = report.scripts_run(),
            state = ?report.state,
            "Hook chain finished"
        );
        debug!(phase = %phase, state = ?ChainState::Done, "Hook chain returned");

        Ok(report)
    }
}

fn reject_pending(commands: &mut [RefUpdateCommand], reason: &str) {
    for command in commands.iter_mut() {
        command.reject(reason);
    }
}
