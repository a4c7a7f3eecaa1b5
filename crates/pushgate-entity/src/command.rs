//! Ref-update commands and their disposition.

use std::fmt;

use serde::{Deserialize, Serialize};

use pushgate_core::{AppError, AppResult};

use crate::object_id::ObjectId;

/// Disposition of a single ref update.
///
/// Every command starts as `NotProcessed` and transitions exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CommandStatus {
    /// No decision has been made yet.
    #[default]
    NotProcessed,
    /// The update is accepted.
    Accepted,
    /// The update is refused.
    Rejected {
        /// Why the update was refused.
        reason: String,
    },
}

impl CommandStatus {
    /// Whether a decision has been made.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::NotProcessed)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotProcessed => write!(f, "not processed"),
            Self::Accepted => write!(f, "ok"),
            Self::Rejected { reason } => write!(f, "rejected ({reason})"),
        }
    }
}

/// What a ref update does to its ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// The ref is created.
    Create,
    /// The ref is moved.
    Update,
    /// The ref is deleted.
    Delete,
}

/// A requested change of one ref from an old object id to a new one.
///
/// Identity is the ref name within one push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefUpdateCommand {
    old_id: ObjectId,
    new_id: ObjectId,
    ref_name: String,
    status: CommandStatus,
}

impl RefUpdateCommand {
    /// Creates a pending command.
    pub fn new(old_id: ObjectId, new_id: ObjectId, ref_name: impl Into<String>) -> Self {
        Self {
            old_id,
            new_id,
            ref_name: ref_name.into(),
            status: CommandStatus::NotProcessed,
        }
    }

    /// Parses one line of Git hook input: `<old-id> <new-id> <ref-name>`.
    pub fn parse_line(line: &str) -> AppResult<Self> {
        let mut parts = line.split_whitespace();
        let (Some(old), Some(new), Some(ref_name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AppError::validation(format!(
                "Malformed ref update '{line}': expected '<old> <new> <ref>'"
            )));
        };
        Ok(Self::new(ObjectId::parse(old)?, ObjectId::parse(new)?, ref_name))
    }

    /// The object id the ref points at before the push.
    pub fn old_id(&self) -> &ObjectId {
        &self.old_id
    }

    /// The object id the ref will point at after the push.
    pub fn new_id(&self) -> &ObjectId {
        &self.new_id
    }

    /// The fully qualified ref name, e.g. `refs/heads/master`.
    pub fn ref_name(&self) -> &str {
        &self.ref_name
    }

    /// Current disposition.
    pub fn status(&self) -> &CommandStatus {
        &self.status
    }

    /// Whether no decision has been made yet.
    pub fn is_pending(&self) -> bool {
        !self.status.is_final()
    }

    /// Classifies the update from its zero ids.
    pub fn kind(&self) -> CommandKind {
        if self.old_id.is_zero() {
            CommandKind::Create
        } else if self.new_id.is_zero() {
            CommandKind::Delete
        } else {
            CommandKind::Update
        }
    }

    /// Marks the command accepted. Returns `false` if it was already decided.
    pub fn accept(&mut self) -> bool {
        self.transition(CommandStatus::Accepted)
    }

    /// Marks the command rejected. Returns `false` if it was already decided.
    pub fn reject(&mut self, reason: impl Into<String>) -> bool {
        self.transition(CommandStatus::Rejected {
            reason: reason.into(),
        })
    }

    fn transition(&mut self, next: CommandStatus) -> bool {
        if self.status.is_final() {
            return false;
        }
        self.status = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: &str = "c18877690322dfc6ae3e37bb7f7085a24e94e887";
    const NEW: &str = "3fa7c46d11b11d61f1cbadc6888be5d0eae21969";

    #[test]
    fn test_parse_line() {
        let cmd = RefUpdateCommand::parse_line(&format!("{OLD} {NEW} refs/heads/master"))
            .expect("valid line");
        assert_eq!(cmd.ref_name(), "refs/heads/master");
        assert_eq!(cmd.kind(), CommandKind::Update);
        assert!(cmd.is_pending());
    }

    #[test]
    fn test_parse_line_rejects_wrong_arity() {
        assert!(RefUpdateCommand::parse_line(OLD).is_err());
        assert!(RefUpdateCommand::parse_line(&format!("{OLD} {NEW} refs/heads/a extra")).is_err());
    }

    #[test]
    fn test_status_transitions_once() {
        let mut cmd = RefUpdateCommand::new(ObjectId::zero(), NEW.parse().expect("id"), "refs/tags/v1");
        assert_eq!(cmd.kind(), CommandKind::Create);
        assert!(cmd.reject("protected"));
        assert!(!cmd.accept());
        assert_eq!(
            cmd.status(),
            &CommandStatus::Rejected {
                reason: "protected".to_string()
            }
        );
    }

    #[test]
    fn test_status_serializes_tagged() {
        let json = serde_json::to_value(CommandStatus::Accepted).expect("serialize");
        assert_eq!(json, serde_json::json!({ "state": "accepted" }));
    }
}
