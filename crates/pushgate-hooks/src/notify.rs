//! Notification dispatcher — best-effort mail delivery for hook scripts.
//!
//! Notification is a side effect, not a push-acceptance gate:
//! - [`NotificationDispatcher::try_send`] reports the raw transport result.
//! - [`NotificationDispatcher::send`] logs and swallows delivery failures
//!   so a broken transport never aborts the hook chain.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pushgate_entity::NotificationMessage;

use crate::api::facade::ServiceFacade;
use crate::api::logger::HookLogger;
use crate::error::DeliveryError;

/// Record of one delivered message.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    /// Identifier assigned to the delivery.
    pub message_id: Uuid,
    /// Subject of the delivered message.
    pub subject: String,
    /// Number of distinct recipients.
    pub recipient_count: usize,
    /// When the transport accepted the message.
    pub delivered_at: DateTime<Utc>,
}

/// Outcome of a best-effort send.
#[derive(Debug, Clone)]
pub enum DeliveryOutcome {
    /// The transport accepted the message.
    Delivered(DeliveryReport),
    /// Nothing was sent because there were no recipients.
    Skipped,
    /// The transport failed; the failure has been logged.
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    /// Whether the message reached the transport.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

/// Delivers notification messages through the service facade.
#[derive(Clone)]
pub struct NotificationDispatcher {
    facade: Arc<dyn ServiceFacade>,
    logger: Option<Arc<dyn HookLogger>>,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl NotificationDispatcher {
    /// Creates a dispatcher over `facade`.
    pub fn new(facade: Arc<dyn ServiceFacade>) -> Self {
        Self {
            facade,
            logger: None,
        }
    }

    /// Also reports delivery failures to a script logger.
    pub fn with_logger(mut self, logger: Arc<dyn HookLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Hands `message` to the transport and returns its raw result, even
    /// when the recipient set is empty.
    pub async fn try_send(
        &self,
        message: &NotificationMessage,
    ) -> Result<DeliveryReport, DeliveryError> {
        self.facade
            .send_mail(&message.subject, &message.body, &message.recipients)
            .await?;

        let report = DeliveryReport {
            message_id: Uuid::now_v7(),
            subject: message.subject.clone(),
            recipient_count: message.recipients.len(),
            delivered_at: Utc::now(),
        };

        info!(
            message_id = %report.message_id,
            subject = %report.subject,
            recipients = report.recipient_count,
            "Notification delivered"
        );

        Ok(report)
    }

    /// Sends one message, deduplicating `recipients`. Never fails.
    pub async fn send<I, S>(
        &self,
        subject: impl Into<String>,
        body: impl Into<String>,
        recipients: I,
    ) -> DeliveryOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let message = NotificationMessage::new(subject, body, recipients);
        self.send_message(&message).await
    }

    /// Sends a prepared message. Never fails.
    pub async fn send_message(&self, message: &NotificationMessage) -> DeliveryOutcome {
        if message.recipients.is_empty() {
            debug!(subject = %message.subject, "No recipients, notification skipped");
            if let Some(logger) = &self.logger {
                logger.warn(&format!("No recipients for '{}', nothing sent", message.subject));
            }
            return DeliveryOutcome::Skipped;
        }

        match self.try_send(message).await {
            Ok(report) => DeliveryOutcome::Delivered(report),
            Err(err) => {
                warn!(
                    subject = %message.subject,
                    recipients = message.recipients.len(),
                    error = %err,
                    "Notification delivery failed"
                );
                if let Some(logger) = &self.logger {
                    logger.error(&format!("Failed to send '{}': {err}", message.subject));
                }
                DeliveryOutcome::Failed(err)
            }
        }
    }
}
