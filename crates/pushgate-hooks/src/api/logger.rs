//! Logger bound as `logger` for hook scripts.

/// Free-text logger handed to scripts.
pub trait HookLogger: Send + Sync {
    /// Records an informational message.
    fn info(&self, message: &str);

    /// Records a warning.
    fn warn(&self, message: &str) {
        self.info(message);
    }

    /// Records an error.
    fn error(&self, message: &str) {
        self.info(message);
    }
}

/// Default logger forwarding script messages to `tracing`.
#[derive(Debug, Clone)]
pub struct TracingHookLogger {
    repository: String,
}

impl TracingHookLogger {
    /// Creates a logger that tags every message with the repository name.
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }
}

impl HookLogger for TracingHookLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "pushgate::script", repository = %self.repository, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "pushgate::script", repository = %self.repository, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "pushgate::script", repository = %self.repository, "{message}");
    }
}
