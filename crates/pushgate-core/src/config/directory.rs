//! Repository and team directory served by the configuration-backed facade.

use serde::{Deserialize, Serialize};

/// Static repository/team directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Known repositories.
    pub repositories: Vec<RepositoryEntry>,
    /// Known teams.
    pub teams: Vec<TeamEntry>,
}

/// One repository in the directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryEntry {
    /// Repository name, e.g. `helloworld.git`.
    pub name: String,
    /// Addresses subscribed to this repository.
    pub mailing_lists: Vec<String>,
    /// Teams with access to this repository.
    pub teams: Vec<String>,
    /// Repository-specific pre-receive scripts.
    pub pre_receive_scripts: Vec<String>,
    /// Repository-specific post-receive scripts.
    pub post_receive_scripts: Vec<String>,
}

/// One team in the directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamEntry {
    /// Team name.
    pub name: String,
    /// Addresses subscribed on behalf of this team.
    pub mailing_lists: Vec<String>,
    /// Repositories the team has access to.
    pub repositories: Vec<String>,
}

impl DirectoryConfig {
    /// Finds a repository entry by exact name.
    pub fn repository(&self, name: &str) -> Option<&RepositoryEntry> {
        self.repositories.iter().find(|r| r.name == name)
    }

    /// Finds a team entry by exact name.
    pub fn team(&self, name: &str) -> Option<&TeamEntry> {
        self.teams.iter().find(|t| t.name == name)
    }
}
