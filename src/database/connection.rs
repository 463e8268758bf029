use anyhow::{Context, Result as AnyhowResult};
use rusqlite::{Connection, OpenFlags, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use super::migrations::MigrationManager;

#[derive(Debug, Clone)]
pub struct DatabaseManager {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseManager {
    pub fn new(db_path: impl AsRef<Path>) -> AnyhowResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let connection = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .with_context(|| format!("Failed to open database at: {}", db_path.display()))?;

        // Configure SQLite settings for performance and safety
        connection.execute("PRAGMA foreign_keys = ON", [])?;
        // Some PRAGMA statements return values, so we need to consume them
        connection
            .prepare("PRAGMA journal_mode = WAL")?
            .query_map([], |_| Ok(()))?
            .for_each(drop);
        connection
            .prepare("PRAGMA synchronous = NORMAL")?
            .query_map([], |_| Ok(()))?
            .for_each(drop);
        connection
            .prepare("PRAGMA cache_size = -64000")?
            .query_map([], |_| Ok(()))?
            .for_each(drop); // 64MB cache
        connection
            .prepare("PRAGMA temp_store = memory")?
            .query_map([], |_| Ok(()))?
            .for_each(drop);

        let manager = Self {
            db_path,
            connection: Arc::new(Mutex::new(connection)),
        };

        manager.run_migrations()?;

        info!("Database initialized at: {}", manager.db_path.display());
        Ok(manager)
    }

    pub fn open_in_memory() -> AnyhowResult<Self> {
        let connection =
            Connection::open_in_memory().context("Failed to create in-memory database")?;

        connection.execute("PRAGMA foreign_keys = ON", [])?;

        let manager = Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(connection)),
        };

        manager.run_migrations()?;
        Ok(manager)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn with_connection<F, R>(&self, f: F) -> AnyhowResult<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        let conn = self
            .connection
            .lock()
            .map_err(|_| anyhow::anyhow!("Database connection lock poisoned"))?;
        f(&conn).with_context(|| "Database operation failed")
    }

    pub fn with_connection_anyhow<F, R>(&self, f: F) -> AnyhowResult<R>
    where
        F: FnOnce(&Connection) -> AnyhowResult<R>,
    {
        let conn = self
            .connection
            .lock()
            .map_err(|_| anyhow::anyhow!("Database connection lock poisoned"))?;
        f(&conn)
    }

    fn run_migrations(&self) -> AnyhowResult<()> {
        self.with_connection_anyhow(|conn| {
            let manager = MigrationManager::new();
            manager.migrate(conn)
        })
    }
}
