//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pushgate_entity::{NotificationMessage, ObjectId, RefUpdateCommand, RepositoryModel, TeamModel};
use pushgate_hooks::{
    DeliveryError, HookLogger, HookOrchestrator, NativeInterpreter, ScriptRuntime, ServiceFacade,
};

pub const OLD_ID: &str = "c18877690322dfc6ae3e37bb7f7085a24e94e887";
pub const NEW_ID: &str = "3fa7c46d11b11d61f1cbadc6888be5d0eae21969";
pub const URL: &str = "https://localhost:8443";

/// Facade double: every team has `list@<team>.com`, every `mail.*` list
/// setting returns three fixed addresses, and sent mail is recorded.
#[derive(Default)]
pub struct MockGitblit {
    pub messages: Mutex<Vec<NotificationMessage>>,
    pub fail_delivery: Option<DeliveryError>,
}

impl MockGitblit {
    pub fn failing(err: DeliveryError) -> Self {
        Self {
            fail_delivery: Some(err),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.messages.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ServiceFacade for MockGitblit {
    async fn repository(&self, name: &str) -> Option<RepositoryModel> {
        Some(repository_named(name))
    }

    async fn team(&self, name: &str) -> Option<TeamModel> {
        Some(TeamModel::new(name).with_mailing_list(format!("list@{name}.com")))
    }

    async fn repository_teams(&self, _repository: &RepositoryModel) -> Vec<String> {
        vec!["testteam".to_string()]
    }

    fn string(&self, _key: &str, default: &str) -> String {
        default.to_string()
    }

    fn boolean(&self, _key: &str, default: bool) -> bool {
        default
    }

    fn integer(&self, _key: &str, default: i64) -> i64 {
        default
    }

    fn strings(&self, key: &str) -> Vec<String> {
        if !key.starts_with("mail.") {
            return Vec::new();
        }
        ["alpha@aaa.com", "beta@bee.com", "gamma@see.com"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        recipients: &BTreeSet<String>,
    ) -> Result<(), DeliveryError> {
        if let Some(err) = &self.fail_delivery {
            return Err(err.clone());
        }
        self.messages.lock().expect("lock").push(NotificationMessage::new(
            subject,
            body,
            recipients.iter().cloned(),
        ));
        Ok(())
    }
}

/// Logger double recording every message.
#[derive(Default)]
pub struct MockLogger {
    pub messages: Mutex<Vec<String>>,
}

impl MockLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock").clone()
    }
}

impl HookLogger for MockLogger {
    fn info(&self, message: &str) {
        self.messages.lock().expect("lock").push(message.to_string());
    }
}

pub fn repository_named(name: &str) -> RepositoryModel {
    RepositoryModel::new(name).with_mailing_list(format!("list@{name}"))
}

pub fn helloworld() -> RepositoryModel {
    repository_named("helloworld.git")
}

pub fn master_update() -> Vec<RefUpdateCommand> {
    vec![RefUpdateCommand::new(
        ObjectId::parse(OLD_ID).expect("old id"),
        ObjectId::parse(NEW_ID).expect("new id"),
        "refs/heads/master",
    )]
}

/// Creates an empty `<name>.groovy` for each script.
pub fn script_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(dir.path(), names);
    dir
}

pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(format!("{name}.groovy")), "").expect("write script");
    }
}

/// An orchestrator running `interpreter` over scripts in `dir`.
pub fn orchestrator(
    dir: &Path,
    interpreter: NativeInterpreter,
    gitblit: Arc<MockGitblit>,
    logger: Arc<MockLogger>,
) -> HookOrchestrator {
    let runtime = ScriptRuntime::new(dir, Arc::new(interpreter)).with_extensions(["groovy"]);
    HookOrchestrator::new(runtime, gitblit).with_logger(logger)
}
