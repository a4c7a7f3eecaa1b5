//! `pre-receive` / `post-receive` commands.
//!
//! Input is Git's hook format on stdin: one `<old> <new> <ref>` line per
//! ref update. One status line per command is printed to stdout.

use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use pushgate_core::config::AppConfig;
use pushgate_core::AppResult;
use pushgate_entity::{CommandStatus, RefUpdateCommand, RepositoryModel, UserModel};
use pushgate_hooks::{HookError, HookPhase, ServiceFacade};

use crate::output;

/// Arguments for the receive commands
#[derive(Debug, Args)]
pub struct ReceiveArgs {
    /// Repository being pushed to
    #[arg(short, long)]
    pub repository: String,

    /// Pushing user
    #[arg(short, long)]
    pub user: String,

    /// Server origin URL bound as `url`
    #[arg(long, default_value = "")]
    pub url: String,
}

/// Execute a receive command
pub async fn execute(
    args: &ReceiveArgs,
    phase: HookPhase,
    config: &AppConfig,
) -> AppResult<i32> {
    let mut commands = read_commands(BufReader::new(tokio::io::stdin())).await?;
    let (facade, orchestrator) = super::build_orchestrator(config);

    let repository = match facade.repository(&args.repository).await {
        Some(repository) => repository,
        None => {
            tracing::info!(
                repository = %args.repository,
                "Repository not in directory, running server-wide scripts only"
            );
            RepositoryModel::new(&args.repository)
        }
    };
    let user = UserModel::new(&args.user);

    let result = orchestrator
        .run_phase(phase, &repository, &user, &args.url, &mut commands)
        .await;

    output::print_statuses(&commands);

    Ok(exit_code(phase, result.map(|_| ()), &commands))
}

/// Reads ref updates until end of input, skipping blank lines.
pub async fn read_commands<R>(reader: R) -> AppResult<Vec<RefUpdateCommand>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut commands = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        commands.push(RefUpdateCommand::parse_line(&line)?);
    }
    Ok(commands)
}

/// Maps a chain result to the hook's exit code.
///
/// A post-receive failure cannot undo the update, so it only warns.
fn exit_code(phase: HookPhase, result: Result<(), HookError>, commands: &[RefUpdateCommand]) -> i32 {
    let rejected = commands
        .iter()
        .any(|c| matches!(c.status(), CommandStatus::Rejected { .. }));

    match (phase, result) {
        (HookPhase::PreReceive, Err(err)) => {
            output::print_error(&err.to_string());
            1
        }
        (HookPhase::PreReceive, Ok(())) if rejected => 1,
        (HookPhase::PreReceive, Ok(())) => 0,
        (HookPhase::PostReceive, Err(err)) => {
            output::print_warning(&err.to_string());
            0
        }
        (HookPhase::PostReceive, Ok(())) => 0,
    }
}
