//! Script runtime adapter — name resolution, execution and normalization.
//!
//! A script name resolves to a file under the script directory: the exact
//! name first, then `name.<ext>` for each configured extension. Names that
//! would leave the directory (absolute paths, `..`) never resolve.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use pushgate_core::config::hooks::HooksConfig;

use super::interpreter::{ScriptInterpreter, ScriptSource};
use super::outcome::HookOutcome;
use crate::context::BindingContext;
use crate::error::HookError;

/// Runs named scripts from one directory through one interpreter.
#[derive(Clone)]
pub struct ScriptRuntime {
    directory: PathBuf,
    extensions: Vec<String>,
    timeout: Option<Duration>,
    interpreter: Arc<dyn ScriptInterpreter>,
}

impl std::fmt::Debug for ScriptRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRuntime")
            .field("directory", &self.directory)
            .field("extensions", &self.extensions)
            .field("timeout", &self.timeout)
            .field("interpreter", &self.interpreter.name())
            .finish()
    }
}

impl ScriptRuntime {
    /// Creates a runtime with no extensions and no timeout.
    pub fn new(directory: impl Into<PathBuf>, interpreter: Arc<dyn ScriptInterpreter>) -> Self {
        Self {
            directory: directory.into(),
            extensions: Vec::new(),
            timeout: None,
            interpreter,
        }
    }

    /// Creates a runtime from the `[hooks]` configuration section.
    pub fn from_config(config: &HooksConfig, interpreter: Arc<dyn ScriptInterpreter>) -> Self {
        let mut runtime = Self::new(&config.script_directory, interpreter)
            .with_extensions(config.script_extensions.iter().cloned());
        runtime.timeout = config.script_timeout();
        runtime
    }

    /// Sets the extensions tried after the exact name.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    /// Limits how long one script may run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The script directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Resolves `name` to a script file.
    pub async fn resolve(&self, name: &str) -> Result<ScriptSource, HookError> {
        let not_found = || HookError::ScriptNotFound {
            script: name.to_string(),
            directory: self.directory.clone(),
        };

        let relative = Path::new(name);
        let confined = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !confined {
            debug!(script = %name, "Script name escapes the script directory");
            return Err(not_found());
        }

        let mut candidates = vec![self.directory.join(relative)];
        candidates.extend(
            self.extensions
                .iter()
                .map(|ext| self.directory.join(format!("{name}.{ext}"))),
        );

        for path in candidates {
            if tokio::fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false)
            {
                // Interpreters may change directory before opening the file.
                let path = std::path::absolute(&path).unwrap_or(path);
                return Ok(ScriptSource {
                    name: name.to_string(),
                    path,
                });
            }
        }

        Err(not_found())
    }

    /// Runs the script called `name` and normalizes its result.
    pub async fn run(
        &self,
        name: &str,
        context: &mut BindingContext<'_>,
    ) -> Result<HookOutcome, HookError> {
        let script = self.resolve(name).await?;

        debug!(
            script = %script.name,
            path = %script.path.display(),
            interpreter = %self.interpreter.name(),
            "Executing hook script"
        );

        let execution = self.interpreter.execute(&script, context);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, execution).await {
                Ok(result) => result,
                Err(_) => Err(format!("timed out after {} seconds", limit.as_secs_f64()).into()),
            },
            None => execution.await,
        };

        result
            .map(|value| HookOutcome::from_value(&value))
            .map_err(|source| HookError::ScriptExecution {
                script: script.name.clone(),
                source,
            })
    }
}
