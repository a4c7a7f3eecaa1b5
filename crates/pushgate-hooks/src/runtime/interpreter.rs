//! Interpreter seam — executes one resolved script against a context.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::BindingContext;
use crate::error::BoxError;

/// A script name resolved to a file under the script directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    /// The name the script was configured under.
    pub name: String,
    /// Absolute or directory-relative path of the script file.
    pub path: PathBuf,
}

impl ScriptSource {
    /// File name without its extension; the key native scripts register under.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

/// Executes hook scripts.
///
/// Implementations return the script's raw result value; `Value::Null`
/// stands for "no explicit return". Any error is wrapped by the runtime
/// into a script execution failure.
#[async_trait]
pub trait ScriptInterpreter: Send + Sync {
    /// Short interpreter name for logs.
    fn name(&self) -> &str;

    /// Runs `script` with the push's bindings.
    async fn execute(
        &self,
        script: &ScriptSource,
        context: &mut BindingContext<'_>,
    ) -> Result<Value, BoxError>;
}
