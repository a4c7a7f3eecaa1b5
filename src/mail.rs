//! Spool-directory mail sink.
//!
//! Each message becomes one JSON document in the spool directory, named
//! `<timestamp>-<id>.json`. Delivery to a real MTA is left to whatever
//! drains the spool.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pushgate_core::config::mail::MailConfig;
use pushgate_hooks::DeliveryError;

/// A spooled message, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpooledMail {
    /// Message identifier; also part of the file name.
    pub id: Uuid,
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: BTreeSet<String>,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// When the message was spooled.
    pub queued_at: DateTime<Utc>,
}

/// Writes outbound mail to a spool directory.
#[derive(Debug, Clone)]
pub struct SpoolMailer {
    enabled: bool,
    directory: PathBuf,
    from: String,
}

impl SpoolMailer {
    /// Creates a mailer from the `[mail]` configuration section.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            enabled: config.enabled,
            directory: PathBuf::from(&config.spool_directory),
            from: config.from.clone(),
        }
    }

    /// Spools one message.
    pub async fn deliver(
        &self,
        subject: &str,
        body: &str,
        recipients: &BTreeSet<String>,
    ) -> Result<SpooledMail, DeliveryError> {
        if !self.enabled {
            return Err(DeliveryError::TransportUnavailable(
                "mail delivery is disabled".to_string(),
            ));
        }

        if let Some(bad) = recipients.iter().find(|a| !is_address(a)) {
            return Err(DeliveryError::MalformedAddress(bad.clone()));
        }

        let mail = SpooledMail {
            id: Uuid::now_v7(),
            from: self.from.clone(),
            to: recipients.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
            queued_at: Utc::now(),
        };

        let unavailable = |e: std::io::Error| DeliveryError::TransportUnavailable(e.to_string());

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(unavailable)?;

        let path = self.directory.join(format!(
            "{}-{}.json",
            mail.queued_at.format("%Y%m%dT%H%M%S%.3fZ"),
            mail.id
        ));
        let document = serde_json::to_vec_pretty(&mail)
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;
        tokio::fs::write(&path, document).await.map_err(unavailable)?;

        tracing::debug!(
            id = %mail.id,
            path = %path.display(),
            recipients = mail.to.len(),
            "Mail spooled"
        );

        Ok(mail)
    }
}

/// Minimal shape check: `local@domain`, no whitespace.
fn is_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !address.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
