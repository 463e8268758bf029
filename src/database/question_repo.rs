use anyhow::Result as AnyhowResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::connection::DatabaseManager;
use crate::models::Question;

pub struct QuestionRepository {
    db: DatabaseManager,
}

impl QuestionRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn insert(&self, question: &Question) -> AnyhowResult<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO questions
                 (id, text_content, correct_answer, raw_source, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    question.id.to_string(),
                    question.text_content,
                    question.correct_answer,
                    question.raw_source,
                    question.created_at.to_rfc3339(),
                    question.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn get(&self, id: Uuid) -> AnyhowResult<Option<Question>> {
        self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT id, text_content, correct_answer, raw_source, created_at, updated_at
                 FROM questions WHERE id = ?1",
                params![id.to_string()],
                row_to_question,
            )
            .optional()
        })
    }

    pub fn list_all(&self) -> AnyhowResult<Vec<Question>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, text_content, correct_answer, raw_source, created_at, updated_at
                 FROM questions ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map([], row_to_question)?;
            rows.collect()
        })
    }

    pub fn count(&self) -> AnyhowResult<u32> {
        self.db.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))
        })
    }
}

fn row_to_question(row: &Row<'_>) -> rusqlite::Result<Question> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;

    Ok(Question {
        id: parse_uuid(&id, 0)?,
        text_content: row.get(1)?,
        correct_answer: row.get(2)?,
        raw_source: row.get(3)?,
        created_at: parse_timestamp(&created_at, 4)?,
        updated_at: parse_timestamp(&updated_at, 5)?,
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
