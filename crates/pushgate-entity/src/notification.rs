//! Outbound notification message.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A message addressed to a deduplicated set of recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Recipient addresses, deduplicated by exact string equality.
    pub recipients: BTreeSet<String>,
}

impl NotificationMessage {
    /// Builds a message, collapsing duplicate recipients.
    pub fn new<I, S>(subject: impl Into<String>, body: impl Into<String>, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject: subject.into(),
            body: body.into(),
            recipients: recipients.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients_are_deduplicated_exactly() {
        let message = NotificationMessage::new(
            "subject",
            "body",
            ["a@x.com", "a@x.com", "A@x.com", "b@x.com"],
        );
        assert_eq!(message.recipients.len(), 3);
    }
}
