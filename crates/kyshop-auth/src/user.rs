//! User types.

use chrono::{DateTime, Utc};
use kyshop_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// A signed-in shopper, as reported by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Display name given at sign-up.
    pub full_name: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a fresh ID.
    pub fn new(email: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            id: UserId::generate(),
            email: email.into(),
            full_name,
            created_at: Utc::now(),
        }
    }

    /// Name shown in the header menu: full name, else the email.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}
