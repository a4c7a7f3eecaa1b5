//! Child-process interpreter.
//!
//! Runs the script file as a child process. The binding snapshot is written
//! to stdin as one JSON document, and the scalar bindings are also exported
//! as `PUSHGATE_*` environment variables. The last non-empty stdout line is
//! the script's return value: parsed as JSON, otherwise taken as a string.
//! Each stderr line is forwarded to the hook logger.
//!
//! A process script sees only that snapshot. The `gitblit` facade, the
//! notification dispatcher and the logger stay in this process, so a
//! process script cannot look up settings or send mail; scripts that need
//! them are registered with the native interpreter instead. Its stdin is
//! fed while stdout and stderr are drained, and it runs from its own
//! directory.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::interpreter::{ScriptInterpreter, ScriptSource};
use crate::context::BindingContext;
use crate::error::BoxError;

/// Longest stderr excerpt carried in an error.
const STDERR_EXCERPT: usize = 2000;

/// Errors from running a script process
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be spawned
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        /// The program that was launched
        program: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero code
    #[error("Script exited with code {code}: {stderr}")]
    Failed {
        /// The exit code, `-1` when killed by a signal
        code: i32,
        /// Standard error output
        stderr: String,
    },

    /// IO error while talking to the process
    #[error("IO error while running script: {0}")]
    Io(#[from] std::io::Error),
}

/// Executes scripts as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessInterpreter {
    /// Launcher program; `None` executes the script file directly.
    launcher: Option<String>,
    /// Arguments placed between the launcher and the script path.
    launcher_args: Vec<String>,
    /// Extra environment for every script.
    env_vars: HashMap<String, String>,
}

impl ProcessInterpreter {
    /// Executes script files directly (they must be executable).
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs scripts through `program`, e.g. `sh` or `groovy`.
    pub fn with_launcher<I, S>(mut self, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.launcher = Some(program.into());
        self.launcher_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an environment variable for every script.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Builds the command for `path`, which must already be absolute since
    /// the child runs from the script's directory.
    fn command(&self, path: &Path) -> (String, Command) {
        let (program, mut cmd) = match &self.launcher {
            Some(program) => {
                let mut cmd = Command::new(program);
                cmd.args(&self.launcher_args).arg(path);
                (program.clone(), cmd)
            }
            None => (path.display().to_string(), Command::new(path)),
        };
        if let Some(parent) = path.parent() {
            cmd.current_dir(parent);
        }
        (program, cmd)
    }
}

/// Interprets the last non-empty stdout line as the script's return value.
fn parse_result(stdout: &str) -> Value {
    match stdout.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => serde_json::from_str(line).unwrap_or_else(|_| Value::String(line.to_string())),
        None => Value::Null,
    }
}

#[async_trait]
impl ScriptInterpreter for ProcessInterpreter {
    fn name(&self) -> &str {
        "process"
    }

    async fn execute(
        &self,
        script: &ScriptSource,
        context: &mut BindingContext<'_>,
    ) -> Result<Value, BoxError> {
        let start = std::time::Instant::now();
        let path = std::path::absolute(&script.path).map_err(ProcessError::Io)?;
        let (program, mut cmd) = self.command(&path);

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .env("PUSHGATE_SCRIPT", &script.name)
            .env("PUSHGATE_REPOSITORY", &context.repository().name)
            .env("PUSHGATE_USER", &context.user().username)
            .env("PUSHGATE_URL", context.url())
            .env("PUSHGATE_COMMAND_COUNT", context.commands().len().to_string());
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

        let payload = serde_json::to_vec(&context.snapshot())?;
        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            // A script that never reads stdin closes the pipe early.
            match stdin.write_all(&payload).await {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            }
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(ProcessError::Io)?;
        fed.map_err(ProcessError::Io)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            context.logger().info(line);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            tracing::error!(
                script = %script.name,
                program = %program,
                exit_code = code,
                duration_ms,
                "Script process failed"
            );
            return Err(ProcessError::Failed {
                code,
                stderr: stderr.chars().take(STDERR_EXCERPT).collect(),
            }
            .into());
        }

        tracing::debug!(
            script = %script.name,
            program = %program,
            duration_ms,
            "Script process completed"
        );

        Ok(parse_result(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::sync::Arc;

    use pushgate_entity::{ObjectId, RefUpdateCommand, RepositoryModel, UserModel};

    use crate::context::test_support::{RecordingLogger, StubFacade};

    #[test]
    fn test_parse_result() {
        assert_eq!(parse_result(""), Value::Null);
        assert_eq!(parse_result("checking\ntrue\n\n"), Value::Bool(true));
        assert_eq!(parse_result("false"), Value::Bool(false));
        assert_eq!(parse_result("all good"), Value::String("all good".to_string()));
        assert_eq!(parse_result("{\"a\": 1}"), serde_json::json!({"a": 1}));
    }

    async fn run_shell(dir: &Path, body: &str) -> (Result<Value, BoxError>, Vec<String>) {
        run_shell_with(dir, body, 1).await
    }

    async fn run_shell_with(
        dir: &Path,
        body: &str,
        command_count: usize,
    ) -> (Result<Value, BoxError>, Vec<String>) {
        let path = dir.join("hook.sh");
        std::fs::write(&path, body).expect("write script");
        let script = ScriptSource {
            name: "hook".to_string(),
            path,
        };

        let logger = Arc::new(RecordingLogger::default());
        let repository = RepositoryModel::new("helloworld.git");
        let user = UserModel::new("mock");
        let new_id = ObjectId::parse("3fa7c46d11b11d61f1cbadc6888be5d0eae21969").expect("id");
        let mut commands: Vec<RefUpdateCommand> = (0..command_count)
            .map(|i| match i {
                0 => "refs/heads/master".to_string(),
                _ => format!("refs/heads/topic-{i:05}"),
            })
            .map(|name| RefUpdateCommand::new(ObjectId::zero(), new_id.clone(), name))
            .collect();
        let mut context = BindingContext::new(
            Arc::new(StubFacade::default()),
            &repository,
            &user,
            &mut commands,
            "https://git.example.com",
            logger.clone(),
        );

        let interpreter = ProcessInterpreter::new().with_launcher("sh", Vec::<String>::new());
        let result = interpreter.execute(&script, &mut context).await;
        (result, logger.messages())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_result_and_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (result, _) = run_shell(
            dir.path(),
            "cat > /dev/null\necho \"$PUSHGATE_REPOSITORY\" >&2\necho true\n",
        )
        .await;
        assert_eq!(result.expect("runs"), Value::Bool(true));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stderr_forwarded_to_logger() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (result, messages) = run_shell(
            dir.path(),
            "echo \"push by $PUSHGATE_USER\" >&2\necho false\n",
        )
        .await;
        assert_eq!(result.expect("runs"), Value::Bool(false));
        assert_eq!(messages, vec!["push by mock".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_snapshot_on_stdin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (result, _) = run_shell(dir.path(), "cat\n").await;
        let value = result.expect("runs");
        assert_eq!(value["repository"]["name"], "helloworld.git");
        assert_eq!(value["commands"][0]["ref_name"], "refs/heads/master");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_sees_data_bindings_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (result, _) = run_shell(dir.path(), "cat\n").await;
        let value = result.expect("runs");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["commands", "repository", "url", "user"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (result, _) = run_shell(dir.path(), "echo 'boom' >&2\nexit 3\n").await;
        let err = result.expect_err("fails");
        assert!(err.to_string().contains("code 3"));
        assert!(err.to_string().contains("boom"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_relative_script_directory() {
        let dir = tempfile::Builder::new()
            .prefix("scripts-")
            .tempdir_in(".")
            .expect("tempdir");
        let relative = Path::new(".").join(dir.path().file_name().expect("name"));
        assert!(relative.is_relative());

        let (result, _) = run_shell(&relative, "cat > /dev/null\npwd >&2\necho true\n").await;
        assert_eq!(result.expect("runs"), Value::Bool(true));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_push_with_chatty_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        let body = "head -c 200000 /dev/zero | tr '\\0' x\necho\ncat > /dev/null\necho true\n";

        let (result, _) = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            run_shell_with(dir.path(), body, 2000),
        )
        .await
        .expect("script finishes without blocking on its pipes");
        assert_eq!(result.expect("runs"), Value::Bool(true));
    }
}
