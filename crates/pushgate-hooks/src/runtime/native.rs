//! Native interpreter — hook scripts compiled into the binary.
//!
//! The script file still has to exist in the script directory: it is the
//! operator's switch for enabling the hook. Its content is not read; the
//! file stem selects the registered implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use super::interpreter::{ScriptInterpreter, ScriptSource};
use crate::context::BindingContext;
use crate::error::BoxError;

/// A hook script implemented in Rust.
#[async_trait]
pub trait NativeScript: Send + Sync {
    /// Runs the script. Return `Value::Bool(false)` to veto the push and
    /// `Value::Null` for "no explicit result".
    async fn run(&self, context: &mut BindingContext<'_>) -> Result<Value, BoxError>;
}

/// Raised when a script file has no compiled-in implementation.
#[derive(Debug, Error)]
#[error("No native implementation registered for script '{0}'")]
pub struct UnregisteredScript(pub String);

/// Registry of compiled-in scripts keyed by file stem.
#[derive(Default, Clone)]
pub struct NativeInterpreter {
    scripts: HashMap<String, Arc<dyn NativeScript>>,
}

impl std::fmt::Debug for NativeInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.scripts.keys().collect();
        names.sort();
        f.debug_struct("NativeInterpreter")
            .field("scripts", &names)
            .finish()
    }
}

impl NativeInterpreter {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `script` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, script: Arc<dyn NativeScript>) {
        let name = name.into();
        info!(script = %name, "Native hook script registered");
        self.scripts.insert(name, script);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_script(mut self, name: impl Into<String>, script: Arc<dyn NativeScript>) -> Self {
        self.register(name, script);
        self
    }

    /// Whether a script is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}

#[async_trait]
impl ScriptInterpreter for NativeInterpreter {
    fn name(&self) -> &str {
        "native"
    }

    async fn execute(
        &self,
        script: &ScriptSource,
        context: &mut BindingContext<'_>,
    ) -> Result<Value, BoxError> {
        let implementation = self
            .scripts
            .get(script.stem())
            .cloned()
            .ok_or_else(|| UnregisteredScript(script.stem().to_string()))?;
        implementation.run(context).await
    }
}
