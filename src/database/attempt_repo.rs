use anyhow::Result as AnyhowResult;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use super::connection::DatabaseManager;
use crate::models::Attempt;

/// Aggregate progress figures over all of a user's attempts
#[derive(Debug, Clone, PartialEq)]
pub struct OverallProgressStats {
    pub total_answers: u32,
    pub correct_answers: u32,
    pub accuracy_percentage: f64,
    pub avg_response_time_secs: f64,
}

/// Per-calendar-day progress figures
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProgressStats {
    pub date: NaiveDate,
    pub answers: u32,
    pub correct_answers: u32,
    pub avg_response_time_secs: f64,
}

pub struct AttemptRepository {
    db: DatabaseManager,
}

impl AttemptRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn insert(&self, attempt: &Attempt) -> AnyhowResult<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO attempts
                 (id, user_id, question_id, answer, is_correct, response_time_secs, topic, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    attempt.id.to_string(),
                    attempt.user_id.to_string(),
                    attempt.question_id.to_string(),
                    attempt.answer,
                    attempt.is_correct,
                    attempt.response_time_secs,
                    attempt.topic,
                    attempt.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    /// All attempts of one user, most recent first. This is the ordering the
    /// analytics aggregation expects.
    pub fn list_for_user(&self, user_id: Uuid) -> AnyhowResult<Vec<Attempt>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, question_id, answer, is_correct,
                        response_time_secs, topic, created_at
                 FROM attempts
                 WHERE user_id = ?1
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![user_id.to_string()], row_to_attempt)?;
            rows.collect()
        })
    }

    pub fn count_for_user(&self, user_id: Uuid) -> AnyhowResult<u32> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM attempts WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| row.get(0),
            )
        })
    }

    /// Overall answer totals and accuracy, computed in SQL
    pub fn overall_stats(&self, user_id: Uuid) -> AnyhowResult<OverallProgressStats> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(CASE WHEN is_correct THEN 1 ELSE 0 END), 0),
                        COALESCE(AVG(CASE WHEN is_correct THEN 1.0 ELSE 0.0 END) * 100, 0),
                        COALESCE(AVG(response_time_secs), 0)
                 FROM attempts WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| {
                    Ok(OverallProgressStats {
                        total_answers: row.get(0)?,
                        correct_answers: row.get(1)?,
                        accuracy_percentage: row.get(2)?,
                        avg_response_time_secs: row.get(3)?,
                    })
                },
            )
        })
    }

    /// Daily answer stats for the last `days` days, most recent day first
    pub fn daily_stats(&self, user_id: Uuid, days: i64) -> AnyhowResult<Vec<DailyProgressStats>> {
        let start_date = Utc::now() - Duration::days(days);

        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DATE(created_at),
                        COUNT(*),
                        SUM(CASE WHEN is_correct THEN 1 ELSE 0 END),
                        AVG(response_time_secs)
                 FROM attempts
                 WHERE user_id = ?1 AND created_at >= ?2
                 GROUP BY DATE(created_at)
                 ORDER BY DATE(created_at) DESC",
            )?;

            let rows = stmt.query_map(
                params![user_id.to_string(), start_date.to_rfc3339()],
                |row| {
                    let date: String = row.get(0)?;
                    Ok(DailyProgressStats {
                        date: parse_date(&date, 0)?,
                        answers: row.get(1)?,
                        correct_answers: row.get(2)?,
                        avg_response_time_secs: row.get(3)?,
                    })
                },
            )?;
            rows.collect()
        })
    }
}

fn row_to_attempt(row: &Row<'_>) -> rusqlite::Result<Attempt> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let question_id: String = row.get(2)?;
    let created_at: String = row.get(7)?;

    Ok(Attempt {
        id: parse_uuid(&id, 0)?,
        user_id: parse_uuid(&user_id, 1)?,
        question_id: parse_uuid(&question_id, 2)?,
        answer: row.get(3)?,
        is_correct: row.get(4)?,
        response_time_secs: row.get(5)?,
        topic: row.get(6)?,
        created_at: parse_timestamp(&created_at, 7)?,
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

fn parse_date(value: &str, column: usize) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
