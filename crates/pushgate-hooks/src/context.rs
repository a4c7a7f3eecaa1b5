//! Binding context — everything a script may read or invoke for one push.
//!
//! The orchestrator builds exactly one context per push and lends it to
//! every script in the chain, so later scripts observe the command
//! statuses earlier scripts set. The command list is lent as a slice: a
//! script can change a command's status but cannot add, drop or swap
//! commands, and never sees another push's commands.

use std::sync::Arc;

use serde_json::{Value, json};

use pushgate_entity::{RefUpdateCommand, RepositoryModel, UserModel};

use crate::api::facade::ServiceFacade;
use crate::api::logger::HookLogger;
use crate::mailing::MailingListResolver;
use crate::notify::NotificationDispatcher;

/// Names under which the context's values are bound, in binding order.
pub const BINDING_NAMES: [&str; 6] = ["gitblit", "repository", "user", "commands", "url", "logger"];

/// A single named binding, for interpreters that bind values by name.
pub enum Binding<'c> {
    /// `gitblit`: the service facade.
    Facade(&'c dyn ServiceFacade),
    /// `repository`: the repository being pushed to.
    Repository(&'c RepositoryModel),
    /// `user`: the pushing user.
    User(&'c UserModel),
    /// `commands`: the ref updates of this push.
    Commands(&'c [RefUpdateCommand]),
    /// `url`: the server's origin URL.
    Url(&'c str),
    /// `logger`: the script logger.
    Logger(&'c dyn HookLogger),
}

impl std::fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Facade(_) => f.write_str("Facade(<service>)"),
            Self::Repository(r) => f.debug_tuple("Repository").field(&r.name).finish(),
            Self::User(u) => f.debug_tuple("User").field(&u.username).finish(),
            Self::Commands(c) => f.debug_tuple("Commands").field(&c.len()).finish(),
            Self::Url(u) => f.debug_tuple("Url").field(u).finish(),
            Self::Logger(_) => f.write_str("Logger(<logger>)"),
        }
    }
}

/// The bound execution context for one push.
pub struct BindingContext<'a> {
    gitblit: Arc<dyn ServiceFacade>,
    repository: &'a RepositoryModel,
    user: &'a UserModel,
    commands: &'a mut [RefUpdateCommand],
    url: &'a str,
    logger: Arc<dyn HookLogger>,
}

impl std::fmt::Debug for BindingContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingContext")
            .field("repository", &self.repository.name)
            .field("user", &self.user.username)
            .field("commands", &self.commands.len())
            .field("url", &self.url)
            .finish()
    }
}

impl<'a> BindingContext<'a> {
    pub(crate) fn new(
        gitblit: Arc<dyn ServiceFacade>,
        repository: &'a RepositoryModel,
        user: &'a UserModel,
        commands: &'a mut [RefUpdateCommand],
        url: &'a str,
        logger: Arc<dyn HookLogger>,
    ) -> Self {
        Self {
            gitblit,
            repository,
            user,
            commands,
            url,
            logger,
        }
    }

    /// The service facade (`gitblit`).
    pub fn gitblit(&self) -> &dyn ServiceFacade {
        self.gitblit.as_ref()
    }

    /// The repository being pushed to.
    pub fn repository(&self) -> &RepositoryModel {
        self.repository
    }

    /// The pushing user.
    pub fn user(&self) -> &UserModel {
        self.user
    }

    /// The ref updates of this push, in request order.
    pub fn commands(&self) -> &[RefUpdateCommand] {
        &*self.commands
    }

    /// Mutable access to the ref updates, for scripts that decide
    /// individual commands.
    pub fn commands_mut(&mut self) -> &mut [RefUpdateCommand] {
        &mut *self.commands
    }

    /// The server's origin URL.
    pub fn url(&self) -> &str {
        self.url
    }

    /// The script logger.
    pub fn logger(&self) -> &dyn HookLogger {
        self.logger.as_ref()
    }

    /// Looks up a binding by name. Unknown names yield `None`.
    pub fn binding(&self, name: &str) -> Option<Binding<'_>> {
        match name {
            "gitblit" => Some(Binding::Facade(self.gitblit.as_ref())),
            "repository" => Some(Binding::Repository(self.repository)),
            "user" => Some(Binding::User(self.user)),
            "commands" => Some(Binding::Commands(&*self.commands)),
            "url" => Some(Binding::Url(self.url)),
            "logger" => Some(Binding::Logger(self.logger.as_ref())),
            _ => None,
        }
    }

    /// Renders the data bindings as JSON for out-of-process interpreters.
    ///
    /// `gitblit` and `logger` are capabilities, not data, and are omitted.
    pub fn snapshot(&self) -> Value {
        json!({
            "repository": self.repository,
            "user": self.user,
            "commands": self.commands,
            "url": self.url,
        })
    }

    /// Recipient resolver backed by this push's facade.
    pub fn mailing_lists(&self) -> MailingListResolver {
        MailingListResolver::new(self.gitblit.clone())
    }

    /// Notification dispatcher backed by this push's facade and logger.
    pub fn notifications(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(self.gitblit.clone()).with_logger(self.logger.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{RecordingLogger, StubFacade};
    use super::*;

    use pushgate_entity::ObjectId;

    fn commands() -> Vec<RefUpdateCommand> {
        vec![RefUpdateCommand::new(
            ObjectId::parse("c18877690322dfc6ae3e37bb7f7085a24e94e887").expect("id"),
            ObjectId::parse("3fa7c46d11b11d61f1cbadc6888be5d0eae21969").expect("id"),
            "refs/heads/master",
        )]
    }

    #[test]
    fn test_every_binding_name_resolves() {
        let repository = RepositoryModel::new("helloworld.git");
        let user = UserModel::new("mock");
        let mut cmds = commands();
        let context = BindingContext::new(
            Arc::new(StubFacade::default()),
            &repository,
            &user,
            &mut cmds,
            "https://git.example.com",
            Arc::new(RecordingLogger::default()),
        );

        for name in BINDING_NAMES {
            assert!(context.binding(name).is_some(), "binding '{name}' missing");
        }
        assert!(context.binding("session").is_none());
        assert!(matches!(context.binding("url"), Some(Binding::Url("https://git.example.com"))));
    }

    #[test]
    fn test_status_mutation_is_visible_to_owner() {
        let repository = RepositoryModel::new("helloworld.git");
        let user = UserModel::new("mock");
        let mut cmds = commands();
        {
            let mut context = BindingContext::new(
                Arc::new(StubFacade::default()),
                &repository,
                &user,
                &mut cmds,
                "",
                Arc::new(RecordingLogger::default()),
            );
            assert!(context.commands_mut()[0].reject("frozen"));
        }
        assert!(!cmds[0].is_pending());
    }

    #[test]
    fn test_snapshot_omits_capabilities() {
        let repository = RepositoryModel::new("helloworld.git").with_mailing_list("list@helloworld.git");
        let user = UserModel::new("mock");
        let mut cmds = commands();
        let context = BindingContext::new(
            Arc::new(StubFacade::default()),
            &repository,
            &user,
            &mut cmds,
            "https://git.example.com",
            Arc::new(RecordingLogger::default()),
        );

        let snapshot = context.snapshot();
        assert_eq!(snapshot["repository"]["name"], "helloworld.git");
        assert_eq!(snapshot["user"]["username"], "mock");
        assert_eq!(snapshot["commands"][0]["ref_name"], "refs/heads/master");
        assert_eq!(snapshot["commands"][0]["status"]["state"], "not_processed");
        assert!(snapshot.get("gitblit").is_none());
        assert!(snapshot.get("logger").is_none());
    }
}
