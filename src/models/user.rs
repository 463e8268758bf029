use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A study user. Attempts and analytics snapshots are attributed to exactly
/// one user; authentication is handled outside this application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            created_at: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.username.trim().is_empty()
    }
}
