//! Hook engine errors.
//!
//! `ScriptNotFound`, `ScriptExecution` and `HookAborted` end a chain and
//! reach the orchestrator's caller. `DeliveryError` never does: the
//! notification dispatcher logs and swallows it.

use std::path::PathBuf;

use thiserror::Error;

use pushgate_core::error::{AppError, ErrorKind};

/// Boxed cause raised by a script or interpreter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that end a hook chain.
#[derive(Debug, Error)]
pub enum HookError {
    /// The configured script name does not resolve to a file.
    #[error("Hook script '{script}' not found in {}", .directory.display())]
    ScriptNotFound {
        /// The configured script name.
        script: String,
        /// The script directory that was searched.
        directory: PathBuf,
    },

    /// The script raised while executing.
    #[error("Hook script '{script}' failed: {source}")]
    ScriptExecution {
        /// The failing script.
        script: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// The script explicitly returned `false`.
    #[error("Hook script '{script}' rejected the push. Hook scripts aborted.")]
    HookAborted {
        /// The vetoing script.
        script: String,
    },
}

impl HookError {
    /// Name of the script that ended the chain.
    pub fn script(&self) -> &str {
        match self {
            Self::ScriptNotFound { script, .. }
            | Self::ScriptExecution { script, .. }
            | Self::HookAborted { script } => script,
        }
    }

    /// Whether the chain ended by deliberate veto rather than a fault.
    pub fn is_veto(&self) -> bool {
        matches!(self, Self::HookAborted { .. })
    }
}

impl From<HookError> for AppError {
    fn from(err: HookError) -> Self {
        let kind = match &err {
            HookError::HookAborted { .. } => ErrorKind::Authorization,
            HookError::ScriptNotFound { .. } | HookError::ScriptExecution { .. } => {
                ErrorKind::Script
            }
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

/// Outbound mail transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The transport refused an address.
    #[error("Malformed recipient address: {0}")]
    MalformedAddress(String),

    /// The transport could not be reached.
    #[error("Mail transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The transport accepted the connection but refused the message.
    #[error("Mail transport rejected message: {0}")]
    Rejected(String),
}

impl From<DeliveryError> for AppError {
    fn from(err: DeliveryError) -> Self {
        AppError::with_source(ErrorKind::ExternalService, err.to_string(), err)
    }
}
