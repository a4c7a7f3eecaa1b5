//! Configuration-backed service facade.
//!
//! Repositories and teams come from `[[directory.*]]` tables, settings from
//! `[settings]`, and mail goes to the spool directory.

use std::collections::BTreeSet;

use async_trait::async_trait;

use pushgate_core::config::AppConfig;
use pushgate_core::config::directory::DirectoryConfig;
use pushgate_core::config::settings::SettingsTable;
use pushgate_entity::{RepositoryModel, TeamModel};
use pushgate_hooks::{DeliveryError, ServiceFacade};

use crate::mail::SpoolMailer;

/// Serves the hook engine from the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigFacade {
    directory: DirectoryConfig,
    settings: SettingsTable,
    mailer: SpoolMailer,
}

impl ConfigFacade {
    /// Creates a facade over `config`.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            settings: config.settings.clone(),
            mailer: SpoolMailer::new(&config.mail),
        }
    }
}

#[async_trait]
impl ServiceFacade for ConfigFacade {
    async fn repository(&self, name: &str) -> Option<RepositoryModel> {
        self.directory.repository(name).map(|entry| RepositoryModel {
            name: entry.name.clone(),
            mailing_lists: entry.mailing_lists.iter().cloned().collect(),
            teams: entry.teams.clone(),
            pre_receive_scripts: entry.pre_receive_scripts.clone(),
            post_receive_scripts: entry.post_receive_scripts.clone(),
        })
    }

    async fn team(&self, name: &str) -> Option<TeamModel> {
        self.directory.team(name).map(|entry| TeamModel {
            name: entry.name.clone(),
            mailing_lists: entry.mailing_lists.iter().cloned().collect(),
            repositories: entry.repositories.iter().cloned().collect(),
        })
    }

    /// Teams named on the repository, then teams that list the repository.
    async fn repository_teams(&self, repository: &RepositoryModel) -> Vec<String> {
        let mut teams = repository.teams.clone();
        for team in &self.directory.teams {
            if team.repositories.contains(&repository.name) && !teams.contains(&team.name) {
                teams.push(team.name.clone());
            }
        }
        teams
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.settings.string(key, default)
    }

    fn boolean(&self, key: &str, default: bool) -> bool {
        self.settings.boolean(key, default)
    }

    fn integer(&self, key: &str, default: i64) -> i64 {
        self.settings.integer(key, default)
    }

    fn strings(&self, key: &str) -> Vec<String> {
        self.settings.strings(key)
    }

    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        recipients: &BTreeSet<String>,
    ) -> Result<(), DeliveryError> {
        self.mailer.deliver(subject, body, recipients).await.map(|_| ())
    }
}
