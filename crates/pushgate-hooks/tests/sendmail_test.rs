//! Integration tests for the bundled `sendmail` script.

mod helpers;

use std::sync::Arc;

use pushgate_entity::{CommandStatus, UserModel};
use pushgate_hooks::{DeliveryError, HookPhase, scripts};

use helpers::{MockGitblit, MockLogger};

#[tokio::test]
async fn test_send_mail() {
    let dir = helpers::script_dir(&["sendmail"]);
    let gitblit = Arc::new(MockGitblit::default());
    let logger = Arc::new(MockLogger::default());
    let orchestrator =
        helpers::orchestrator(dir.path(), scripts::bundled(), gitblit.clone(), logger.clone());

    let mut commands = helpers::master_update();
    let report = orchestrator
        .run_chain(
            HookPhase::PostReceive,
            &["sendmail".to_string()],
            &helpers::helloworld(),
            &UserModel::new("mock"),
            helpers::URL,
            &mut commands,
        )
        .await
        .expect("chain succeeds");

    assert_eq!(report.scripts_run(), 1);
    assert_eq!(logger.messages().len(), 1);

    let messages = gitblit.messages();
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.recipients.len(), 5);
    for address in [
        "list@helloworld.git",
        "list@testteam.com",
        "alpha@aaa.com",
        "beta@bee.com",
        "gamma@see.com",
    ] {
        assert!(message.recipients.contains(address), "missing {address}");
    }
    assert!(message.body.contains("3fa7c46d"));
    assert!(message.body.contains("refs/heads/master"));
    assert!(message.subject.contains("helloworld.git"));

    assert_eq!(*commands[0].status(), CommandStatus::Accepted);
}

#[tokio::test]
async fn test_delivery_failure_does_not_change_dispositions() {
    let dir = helpers::script_dir(&["sendmail"]);
    let gitblit = Arc::new(MockGitblit::failing(DeliveryError::TransportUnavailable(
        "connection refused".to_string(),
    )));
    let logger = Arc::new(MockLogger::default());
    let orchestrator =
        helpers::orchestrator(dir.path(), scripts::bundled(), gitblit.clone(), logger.clone());

    let mut commands = helpers::master_update();
    let result = orchestrator
        .run_chain(
            HookPhase::PostReceive,
            &["sendmail".to_string()],
            &helpers::helloworld(),
            &UserModel::new("mock"),
            helpers::URL,
            &mut commands,
        )
        .await;

    assert!(result.is_ok());
    assert!(gitblit.messages().is_empty());
    assert_eq!(*commands[0].status(), CommandStatus::Accepted);
    // the script's own message plus the delivery failure
    assert_eq!(logger.messages().len(), 2);
}

#[tokio::test]
async fn test_two_pushes_are_independent() {
    let dir = helpers::script_dir(&["sendmail"]);
    let gitblit = Arc::new(MockGitblit::default());
    let logger = Arc::new(MockLogger::default());
    let orchestrator =
        helpers::orchestrator(dir.path(), scripts::bundled(), gitblit.clone(), logger.clone());
    let chain = vec!["sendmail".to_string()];
    let user = UserModel::new("mock");
    let helloworld = helpers::helloworld();
    let other = helpers::repository_named("other.git");

    let mut first = helpers::master_update();
    let mut second = helpers::master_update();
    second.extend(helpers::master_update());

    let (a, b) = tokio::join!(
        orchestrator.run_chain(
            HookPhase::PostReceive,
            &chain,
            &helloworld,
            &user,
            helpers::URL,
            &mut first,
        ),
        orchestrator.run_chain(
            HookPhase::PostReceive,
            &chain,
            &other,
            &user,
            helpers::URL,
            &mut second,
        ),
    );
    a.expect("first push");
    b.expect("second push");

    let messages = gitblit.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().any(|m| m.recipients.contains("list@helloworld.git")));
    assert!(messages.iter().any(|m| m.recipients.contains("list@other.git")));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
    assert!(first.iter().chain(second.iter()).all(|c| *c.status() == CommandStatus::Accepted));
}
