//! Team descriptor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A team, resolved by name on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamModel {
    /// Team name.
    pub name: String,
    /// Addresses subscribed on behalf of the team.
    pub mailing_lists: BTreeSet<String>,
    /// Repositories the team has access to.
    pub repositories: BTreeSet<String>,
}

impl TeamModel {
    /// Creates an empty team.
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
}
