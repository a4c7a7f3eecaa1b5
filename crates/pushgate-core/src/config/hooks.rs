//! Hook chain and script runtime configuration.

use serde::{Deserialize, Serialize};

/// Which interpreter executes hook scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpreterKind {
    /// Scripts run as child processes.
    #[default]
    Process,
    /// Scripts dispatch to implementations compiled into the binary.
    Native,
}

/// Hook chain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Directory containing hook scripts.
    pub script_directory: String,
    /// Extensions tried, in order, when a script name has no exact match.
    pub script_extensions: Vec<String>,
    /// Server-wide scripts run before refs are updated.
    pub pre_receive_scripts: Vec<String>,
    /// Server-wide scripts run after refs are updated.
    pub post_receive_scripts: Vec<String>,
    /// Per-script timeout in seconds. `0` disables the timeout.
    pub script_timeout_seconds: u64,
    /// Interpreter used to execute scripts.
    pub interpreter: InterpreterKind,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            script_directory: "./scripts".to_string(),
            script_extensions: vec!["groovy".to_string()],
            pre_receive_scripts: Vec::new(),
            post_receive_scripts: Vec::new(),
            script_timeout_seconds: 0,
            interpreter: InterpreterKind::default(),
        }
    }
}

impl HooksConfig {
    /// Returns the script timeout, if one is configured.
    pub fn script_timeout(&self) -> Option<std::time::Duration> {
        (self.script_timeout_seconds > 0)
            .then(|| std::time::Duration::from_secs(self.script_timeout_seconds))
    }
}
