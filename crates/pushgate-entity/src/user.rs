//! The pushing user.

use serde::{Deserialize, Serialize};

/// The authenticated user performing a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserModel {
    /// Login name.
    pub username: String,
    /// Display name, if known.
    pub display_name: Option<String>,
    /// Email address, if known.
    pub email_address: Option<String>,
}

impl UserModel {
    /// Creates a user known only by login name.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            email_address: None,
        }
    }

    /// Name to show in messages: the display name when set, else the login.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
