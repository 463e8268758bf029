use anyhow::{Context, Result as AnyhowResult};
use rusqlite::{Connection, Result};
use std::collections::HashMap;
use tracing::info;

use super::schema::create_schema;

pub struct Migration {
    pub version: u32,
    pub description: String,
    pub up: fn(&Connection) -> Result<()>,
    pub down: fn(&Connection) -> Result<()>,
}

pub struct MigrationManager {
    migrations: HashMap<u32, Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self {
            migrations: HashMap::new(),
        };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Initial schema migration
        self.add_migration(Migration {
            version: 1,
            description: "Initial schema creation".to_string(),
            up: |conn| {
                create_schema(conn)?;
                Ok(())
            },
            down: |conn| {
                super::schema::drop_schema(conn)?;
                Ok(())
            },
        });
    }

    fn add_migration(&mut self, migration: Migration) {
        self.migrations.insert(migration.version, migration);
    }

    /// Apply all migrations newer than the recorded schema version
    pub fn migrate(&self, conn: &Connection) -> AnyhowResult<()> {
        self.ensure_version_table(conn)
            .context("Failed to create schema_versions table")?;

        let current = self.current_version(conn)?;

        let mut pending: Vec<&Migration> = self
            .migrations
            .values()
            .filter(|m| m.version > current)
            .collect();
        pending.sort_by_key(|m| m.version);

        for migration in pending {
            info!(
                version = migration.version,
                description = %migration.description,
                "Applying migration"
            );
            (migration.up)(conn)
                .with_context(|| format!("Migration {} failed", migration.version))?;
            conn.execute(
                "INSERT INTO schema_versions (version) VALUES (?1)",
                [migration.version],
            )?;
        }

        Ok(())
    }

    fn ensure_version_table(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_versions (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
            )",
            [],
        )?;
        Ok(())
    }

    fn current_version(&self, conn: &Connection) -> AnyhowResult<u32> {
        let version: Option<u32> = conn.query_row(
            "SELECT MAX(version) FROM schema_versions",
            [],
            |row| row.get(0),
        )?;
        Ok(version.unwrap_or(0))
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}
