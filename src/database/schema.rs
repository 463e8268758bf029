use rusqlite::{Connection, Result};

pub fn create_schema(conn: &Connection) -> Result<()> {
    // Create schema version table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_versions (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
        )",
        [],
    )?;

    // Users table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE CHECK (length(username) > 0),
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // Questions table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS questions (
            id TEXT PRIMARY KEY,
            text_content TEXT NOT NULL CHECK (length(text_content) > 0),
            correct_answer TEXT,
            raw_source TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    // Attempts table (append-only answer records)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS attempts (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            question_id TEXT NOT NULL,
            answer TEXT NOT NULL,
            is_correct INTEGER NOT NULL,
            response_time_secs REAL NOT NULL CHECK (response_time_secs >= 0),
            topic TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE CASCADE
        )",
        [],
    )?;

    // Analytics snapshots table (append-only, one row per generation)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS analytics_snapshots (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            generated_at TEXT NOT NULL,
            performance_metrics TEXT NOT NULL, -- JSON object
            learning_insights TEXT NOT NULL,   -- JSON object
            engagement_metrics TEXT NOT NULL,  -- JSON object
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
        [],
    )?;

    // Indexes for the hot queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attempts_user_created
         ON attempts(user_id, created_at DESC)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_snapshots_user_generated
         ON analytics_snapshots(user_id, generated_at DESC)",
        [],
    )?;

    Ok(())
}

pub fn drop_schema(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS analytics_snapshots", [])?;
    conn.execute("DROP TABLE IF EXISTS attempts", [])?;
    conn.execute("DROP TABLE IF EXISTS questions", [])?;
    conn.execute("DROP TABLE IF EXISTS users", [])?;
    conn.execute("DROP TABLE IF EXISTS schema_versions", [])?;
    Ok(())
}
