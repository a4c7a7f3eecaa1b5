//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Mail spool configuration.
///
/// Messages are written to the spool directory as JSON documents; a
/// separate mail daemon is expected to pick them up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Whether outbound mail is enabled at all.
    pub enabled: bool,
    /// Directory where outgoing messages are spooled.
    pub spool_directory: String,
    /// Sender address stamped on every message.
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spool_directory: "data/mail".to_string(),
            from: "pushgate@localhost".to_string(),
        }
    }
}
