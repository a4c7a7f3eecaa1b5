//! Repository descriptor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A hosted repository as seen by the hook engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryModel {
    /// Repository name, e.g. `helloworld.git`.
    pub name: String,
    /// Addresses subscribed to push notifications for this repository.
    pub mailing_lists: BTreeSet<String>,
    /// Teams with access to this repository.
    pub teams: Vec<String>,
    /// Repository-specific pre-receive scripts, in run order.
    pub pre_receive_scripts: Vec<String>,
    /// Repository-specific post-receive scripts, in run order.
    pub post_receive_scripts: Vec<String>,
}

impl RepositoryModel {
    /// Creates a repository with no mailing lists, teams or scripts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a mailing list address.
    pub fn with_mailing_list(mut self, address: impl Into<String>) -> Self {
        self.mailing_lists.insert(address.into());
        self
    }

    /// Adds a team with access.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.teams.push(team.into());
        self
    }
}
