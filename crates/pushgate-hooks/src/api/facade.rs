//! Service facade — the fixed set of server operations scripts may call.
//!
//! Scripts never see the hosting service's object graph; they get this
//! narrow interface bound as `gitblit`.

use std::collections::BTreeSet;

use async_trait::async_trait;

use pushgate_entity::{RepositoryModel, TeamModel};

use crate::error::DeliveryError;

/// Server operations available to hook scripts.
#[async_trait]
pub trait ServiceFacade: Send + Sync {
    /// Looks up a repository by name.
    async fn repository(&self, name: &str) -> Option<RepositoryModel>;

    /// Looks up a team by name.
    async fn team(&self, name: &str) -> Option<TeamModel>;

    /// Names of the teams with access to `repository`.
    async fn repository_teams(&self, repository: &RepositoryModel) -> Vec<String>;

    /// Reads a string setting, falling back to `default`.
    fn string(&self, key: &str, default: &str) -> String;

    /// Reads a boolean setting, falling back to `default`.
    fn boolean(&self, key: &str, default: bool) -> bool;

    /// Reads an integer setting, falling back to `default`.
    fn integer(&self, key: &str, default: i64) -> i64;

    /// Reads a list setting. Missing keys yield an empty list.
    fn strings(&self, key: &str) -> Vec<String>;

    /// Hands one message to the outbound mail transport.
    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        recipients: &BTreeSet<String>,
    ) -> Result<(), DeliveryError>;
}
