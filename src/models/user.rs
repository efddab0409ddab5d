//! User model.
//!
//! Users are an assignee directory: assets reference them by id. There is
//! no authentication attached to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person assets can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// UUID identifier.
    pub id: String,
    /// Email address (unique).
    pub email: String,
    /// Display name.
    pub name: String,
    /// When the user was added.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh UUID.
    pub fn new(email: String, name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            created_at: Utc::now(),
        }
    }
}
