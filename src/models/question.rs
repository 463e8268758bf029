use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quiz question. `text_content` is a raw blob holding the question stem
/// followed by `A)`..`D)` answer options; option extraction is done by
/// `parsers::quiz_text` at render/import time, never at storage time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text_content: String,
    pub correct_answer: Option<String>,
    pub raw_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    pub fn new(text_content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text_content,
            correct_answer: None,
            raw_source: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_correct_answer(mut self, answer: String) -> Self {
        self.correct_answer = Some(answer);
        self
    }

    pub fn with_raw_source(mut self, raw_source: String) -> Self {
        self.raw_source = Some(raw_source);
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.text_content.trim().is_empty()
    }
}
