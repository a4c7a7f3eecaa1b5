//! `sendmail` — emails a push summary to everyone watching the repository.
//!
//! Recipients are the repository's mailing lists, the lists of every team
//! with access, and the addresses configured under `mail.mailing_lists`.

use async_trait::async_trait;
use serde_json::Value;

use pushgate_entity::{CommandKind, RefUpdateCommand};

use crate::context::BindingContext;
use crate::error::BoxError;
use crate::runtime::NativeScript;

/// Settings key holding server-wide notification addresses.
pub const MAILING_LISTS_KEY: &str = "mail.mailing_lists";

/// Settings key holding the subject prefix.
pub const SUBJECT_PREFIX_KEY: &str = "mail.subject_prefix";

/// Push notification script.
#[derive(Debug, Clone)]
pub struct SendMail {
    mailing_lists_key: String,
}

impl Default for SendMail {
    fn default() -> Self {
        Self {
            mailing_lists_key: MAILING_LISTS_KEY.to_string(),
        }
    }
}

impl SendMail {
    /// Reads server-wide addresses from `key` instead of the default.
    pub fn with_mailing_lists_key(key: impl Into<String>) -> Self {
        Self {
            mailing_lists_key: key.into(),
        }
    }
}

fn describe(command: &RefUpdateCommand) -> String {
    match command.kind() {
        CommandKind::Create => format!(
            "created {} at {}",
            command.ref_name(),
            command.new_id().short()
        ),
        CommandKind::Delete => format!(
            "deleted {} (was {})",
            command.ref_name(),
            command.old_id().short()
        ),
        CommandKind::Update => format!(
            "updated {} {}..{}",
            command.ref_name(),
            command.old_id().short(),
            command.new_id().short()
        ),
    }
}

/// Plain text push summary: one line per ref update, then the repository link.
fn summary(user: &str, repository: &str, url: &str, commands: &[RefUpdateCommand]) -> String {
    let lines: Vec<String> = commands
        .iter()
        .map(|command| format!("  {}", describe(command)))
        .collect();

    let mut body = format!("{user} pushed to {repository}\n\n");
    body.push_str(&lines.join("\n"));
    body.push('\n');
    if !url.is_empty() {
        body.push_str(&format!(
            "\n{}/summary/?r={repository}\n",
            url.trim_end_matches('/')
        ));
    }
    body
}

#[async_trait]
impl NativeScript for SendMail {
    async fn run(&self, context: &mut BindingContext<'_>) -> Result<Value, BoxError> {
        let repository = context.repository();
        let recipients = context
            .mailing_lists()
            .resolve_for_push(repository, Some(self.mailing_lists_key.as_str()))
            .await;

        let prefix = context.gitblit().string(SUBJECT_PREFIX_KEY, "[PushGate]");
        let user = context.user();
        let subject = format!(
            "{prefix} {} pushed {} ref update(s) to {}",
            user.display_name(),
            context.commands().len(),
            repository.name
        );

        let body = summary(
            user.display_name(),
            &repository.name,
            context.url(),
            context.commands(),
        );

        context.logger().info(&format!(
            "sending push notification for {} to {} recipient(s)",
            repository.name,
            recipients.len()
        ));

        context
            .notifications()
            .send(subject, body, recipients)
            .await;

        Ok(Value::Null)
    }
}
