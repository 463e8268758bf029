use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topic label used when an attempt carries no topic metadata.
pub const DEFAULT_TOPIC: &str = "general";

/// One recorded answer by a user to one question. Attempts are read-only
/// after insertion; the analytics aggregation never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub answer: String,
    pub is_correct: bool,
    /// Time taken to answer, in seconds
    pub response_time_secs: f64,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    pub fn new(
        user_id: Uuid,
        question_id: Uuid,
        answer: String,
        is_correct: bool,
        response_time_secs: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            question_id,
            answer,
            is_correct,
            response_time_secs,
            topic: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_topic(mut self, topic: String) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// The topic this attempt is grouped under, falling back to "general"
    pub fn topic_label(&self) -> &str {
        self.topic.as_deref().unwrap_or(DEFAULT_TOPIC)
    }

    pub fn is_valid(&self) -> bool {
        self.response_time_secs >= 0.0
    }
}
