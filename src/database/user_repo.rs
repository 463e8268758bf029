use anyhow::Result as AnyhowResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::connection::DatabaseManager;
use crate::models::User;

pub struct UserRepository {
    db: DatabaseManager,
}

impl UserRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn insert(&self, user: &User) -> AnyhowResult<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
                params![
                    user.id.to_string(),
                    user.username,
                    user.created_at.to_rfc3339()
                ],
            )?;
            Ok(())
        })
    }

    pub fn find_by_username(&self, username: &str) -> AnyhowResult<Option<User>> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT id, username, created_at FROM users WHERE username = ?1",
                params![username],
                row_to_user,
            )
            .optional()
        })
    }

    pub fn find_by_id(&self, id: Uuid) -> AnyhowResult<Option<User>> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT id, username, created_at FROM users WHERE id = ?1",
                params![id.to_string()],
                row_to_user,
            )
            .optional()
        })
    }

    /// Look up a user by name, creating the record on first use
    pub fn get_or_create(&self, username: &str) -> AnyhowResult<User> {
        if let Some(user) = self.find_by_username(username)? {
            return Ok(user);
        }
        let user = User::new(username.to_string());
        self.insert(&user)?;
        Ok(user)
    }
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let username: String = row.get(1)?;
    let created_at: String = row.get(2)?;

    Ok(User {
        id: parse_uuid(&id, 0)?,
        username,
        created_at: parse_timestamp(&created_at, 2)?,
    })
}

fn parse_uuid(value: &str, column: usize) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(value: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
