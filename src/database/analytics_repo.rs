use anyhow::Result as AnyhowResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::connection::DatabaseManager;
use crate::models::AnalyticsSnapshot;

/// Storage for analytics snapshots. Snapshots are append-only: every
/// generation inserts a new row, reads return the most recent one.
pub struct AnalyticsRepository {
    db: DatabaseManager,
}

impl AnalyticsRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn insert(&self, snapshot: &AnalyticsSnapshot) -> AnyhowResult<()> {
        let performance = serde_json::to_string(&snapshot.performance_metrics)?;
        let insights = serde_json::to_string(&snapshot.learning_insights)?;
        let engagement = serde_json::to_string(&snapshot.engagement_metrics)?;

        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO analytics_snapshots
                 (id, user_id, generated_at, performance_metrics, learning_insights, engagement_metrics)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    snapshot.id.to_string(),
                    snapshot.user_id.to_string(),
                    snapshot.generated_at.to_rfc3339(),
                    performance,
                    insights,
                    engagement,
                ],
            )?;
            Ok(())
        })
    }

    pub fn latest_for_user(&self, user_id: Uuid) -> AnyhowResult<Option<AnalyticsSnapshot>> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT id, user_id, generated_at,
                        performance_metrics, learning_insights, engagement_metrics
                 FROM analytics_snapshots
                 WHERE user_id = ?1
                 ORDER BY generated_at DESC
                 LIMIT 1",
                params![user_id.to_string()],
                row_to_snapshot,
            )
            .optional()
        })
    }

    pub fn history_for_user(&self, user_id: Uuid) -> AnyhowResult<Vec<AnalyticsSnapshot>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, generated_at,
                        performance_metrics, learning_insights, engagement_metrics
                 FROM analytics_snapshots
                 WHERE user_id = ?1
                 ORDER BY generated_at DESC",
            )?;
            let rows = stmt.query_map(params![user_id.to_string()], row_to_snapshot)?;
            rows.collect()
        })
    }

    pub fn count_for_user(&self, user_id: Uuid) -> AnyhowResult<u32> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM analytics_snapshots WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| row.get(0),
            )
        })
    }
}

fn row_to_snapshot(row: &Row<'_>) -> rusqlite::Result<AnalyticsSnapshot> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let generated_at: String = row.get(2)?;
    let performance: String = row.get(3)?;
    let insights: String = row.get(4)?;
    let engagement: String = row.get(5)?;

    Ok(AnalyticsSnapshot {
        id: parse_uuid(&id, 0)?,
        user_id: parse_uuid(&user_id, 1)?,
        generated_at: parse_timestamp(&generated_at, 2)?,
        performance_metrics: parse_json(&performance, 3)?,
        learning_insights: parse_json(&insights, 4)?,
        engagement_metrics: parse_json(&engagement, 5)?,
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

fn parse_json<T: serde::de::DeserializeOwned>(value: &str, column: usize) -> rusqlite::Result<T> {
    serde_json::from_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
