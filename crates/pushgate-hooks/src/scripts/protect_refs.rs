//! `protect-refs` — refuses deletion of protected refs.
//!
//! Only the offending commands are rejected; the rest of the push goes on.

use async_trait::async_trait;
use serde_json::Value;

use pushgate_entity::CommandKind;

use crate::context::BindingContext;
use crate::error::BoxError;
use crate::runtime::NativeScript;

/// Settings key listing protected refs.
pub const PROTECTED_REFS_KEY: &str = "hooks.protected_refs";

/// Rejects deletes of protected refs.
#[derive(Debug, Clone)]
pub struct ProtectRefs {
    fallback: Vec<String>,
}

impl Default for ProtectRefs {
    fn default() -> Self {
        Self {
            fallback: vec!["refs/heads/master".to_string(), "refs/heads/main".to_string()],
        }
    }
}

#[async_trait]
impl NativeScript for ProtectRefs {
    async fn run(&self, context: &mut BindingContext<'_>) -> Result<Value, BoxError> {
        let mut protected = context.gitblit().strings(PROTECTED_REFS_KEY);
        if protected.is_empty() {
            protected = self.fallback.clone();
        }

        let mut refused = Vec::new();
        for command in context.commands_mut() {
            if command.kind() != CommandKind::Delete
                || !protected.iter().any(|r| r == command.ref_name())
            {
                continue;
            }
            let reason = format!("{} is protected", command.ref_name());
            if command.reject(reason) {
                refused.push(command.ref_name().to_string());
            }
        }

        for name in &refused {
            context.logger().warn(&format!("refused to delete {name}"));
        }

        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use pushgate_entity::{CommandStatus, ObjectId, RefUpdateCommand, RepositoryModel, UserModel};

    use crate::context::test_support::{RecordingLogger, StubFacade};

    #[tokio::test]
    async fn test_rejects_only_protected_deletes() {
        let id = ObjectId::parse("3fa7c46d11b11d61f1cbadc6888be5d0eae21969").expect("id");
        let mut commands = vec![
            RefUpdateCommand::new(id.clone(), ObjectId::zero(), "refs/heads/master"),
            RefUpdateCommand::new(id.clone(), ObjectId::zero(), "refs/heads/topic"),
            RefUpdateCommand::new(ObjectId::zero(), id, "refs/heads/main"),
        ];
        let repository = RepositoryModel::new("helloworld.git");
        let user = UserModel::new("mock");
        let logger = Arc::new(RecordingLogger::default());
        let mut context = BindingContext::new(
            Arc::new(StubFacade::default()),
            &repository,
            &user,
            &mut commands,
            "",
            logger.clone(),
        );

        let value = ProtectRefs::default().run(&mut context).await.expect("runs");

        assert_eq!(value, Value::Null);
        assert_eq!(logger.messages(), vec!["refused to delete refs/heads/master".to_string()]);
        assert!(matches!(commands[0].status(), CommandStatus::Rejected { .. }));
        assert!(commands[1].is_pending());
        assert!(commands[2].is_pending());
    }
}
