use chrono::{DateTime, Utc};

/// A contiguous run of attempts by one user where consecutive attempts are
/// no more than 30 minutes apart. Intermediate value only: sessions are
/// derived during aggregation and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    pub start: DateTime<Utc>,
    pub questions: u32,
    /// Sum of the gaps between consecutive attempts in this session
    pub duration_ms: i64,
}

impl StudySession {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            questions: 1,
            duration_ms: 0,
        }
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_ms as f64 / 60_000.0
    }
}

/// Per-topic tally used while grouping attempts
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicTally {
    pub total: u32,
    pub correct: u32,
}

impl TopicTally {
    pub fn accuracy(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}
