//! `recipients` command.

use clap::Args;

use pushgate_core::config::AppConfig;
use pushgate_core::AppResult;
use pushgate_entity::RepositoryModel;
use pushgate_hooks::{MailingListResolver, ServiceFacade};

/// Arguments for the recipients command
#[derive(Debug, Args)]
pub struct RecipientsArgs {
    /// Repository to resolve recipients for
    #[arg(short, long)]
    pub repository: String,

    /// Team whose lists are included; defaults to the repository's teams
    #[arg(short, long = "team")]
    pub teams: Vec<String>,

    /// Settings key holding extra addresses
    #[arg(short, long)]
    pub key: Option<String>,
}

/// Execute the recipients command
pub async fn execute(args: &RecipientsArgs, config: &AppConfig) -> AppResult<i32> {
    let (facade, _) = super::build_orchestrator(config);
    let repository = facade
        .repository(&args.repository)
        .await
        .unwrap_or_else(|| RepositoryModel::new(&args.repository));
    let resolver = MailingListResolver::new(facade.clone());

    let recipients = if args.teams.is_empty() {
        resolver
            .resolve_for_push(&repository, args.key.as_deref())
            .await
    } else {
        let extra = args
            .key
            .as_deref()
            .map(|key| facade.strings(key))
            .unwrap_or_default();
        resolver.resolve(&repository, &args.teams, extra).await
    };

    if recipients.is_empty() {
        crate::output::print_warning(&format!("No recipients for {}", repository.name));
    }
    for address in &recipients {
        println!("{address}");
    }

    Ok(0)
}
