//! Mailing list resolver — unions repository, team and ad-hoc recipients.
//!
//! Addresses are deduplicated by exact string equality. No case or
//! whitespace normalization is applied; callers supply well-formed
//! addresses. A team that does not exist contributes nothing, so a stale
//! team reference never breaks a hook chain.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use pushgate_entity::RepositoryModel;

use crate::api::facade::ServiceFacade;

/// Resolves notification recipients through the service facade.
#[derive(Clone)]
pub struct MailingListResolver {
    facade: Arc<dyn ServiceFacade>,
}

impl std::fmt::Debug for MailingListResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailingListResolver").finish()
    }
}

impl MailingListResolver {
    /// Creates a resolver over `facade`.
    pub fn new(facade: Arc<dyn ServiceFacade>) -> Self {
        Self { facade }
    }

    /// Resolves the union of the repository's lists, each named team's
    /// lists, and `extra_addresses`.
    pub async fn resolve<T, E>(
        &self,
        repository: &RepositoryModel,
        team_names: T,
        extra_addresses: E,
    ) -> BTreeSet<String>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let team_names: Vec<String> = team_names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let extra_addresses: Vec<String> = extra_addresses.into_iter().map(Into::into).collect();

        let mut recipients = repository.mailing_lists.clone();

        for name in &team_names {
            match self.facade.team(name).await {
                Some(team) => recipients.extend(team.mailing_lists),
                None => debug!(
                    repository = %repository.name,
                    team = %name,
                    "Team not found, contributes no recipients"
                ),
            }
        }

        recipients.extend(extra_addresses);
        recipients
    }

    /// Resolves recipients for a push notification: the repository's lists,
    /// every team with access to the repository, and the address list stored
    /// in server settings under `config_key`, if given.
    pub async fn resolve_for_push(
        &self,
        repository: &RepositoryModel,
        config_key: Option<&str>,
    ) -> BTreeSet<String> {
        let teams = self.facade.repository_teams(repository).await;
        let extra = config_key
            .map(|key| self.facade.strings(key))
            .unwrap_or_default();
        self.resolve(repository, teams, extra).await
    }
}
