use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// =============================================================================
// Analytics Snapshot Model (DB representation)
// =============================================================================

/// Study rhythm summary derived from session segmentation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyPatterns {
    /// Up to three "H:00" hour labels, most frequent first
    pub preferred_times: Vec<String>,
    /// Average session duration in minutes
    pub session_duration_avg: f64,
    pub questions_per_session_avg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    /// Percentage of correct answers over all attempts (0 when no attempts)
    pub overall_accuracy: f64,
    /// Per-topic accuracy percentage, keyed by topic label
    pub topics_accuracy: HashMap<String, f64>,
    /// Accuracy of the recent half minus accuracy of the older half
    pub improvement_rate: f64,
    pub study_patterns: StudyPatterns,
    /// Topics below the 70% accuracy threshold
    pub weak_areas: Vec<String>,
    /// Topics at or above the 70% accuracy threshold
    pub strong_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningInsights {
    pub recommended_topics: Vec<String>,
    /// "increasing" when the improvement rate is non-negative,
    /// "needs_improvement" otherwise
    pub difficulty_progression: String,
    /// First preferred study time, absent when there are no attempts
    pub optimal_study_time: Option<String>,
    /// Hours until a topic should be reviewed again (24 weak / 72 strong)
    pub suggested_review_intervals: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngagementMetrics {
    /// Consecutive calendar days with at least one attempt
    pub study_streak: u32,
    /// Total time spent in study sessions, in minutes
    pub total_study_time: f64,
    /// Sessions per day since the oldest attempt
    pub session_frequency: f64,
    pub last_active: Option<DateTime<Utc>>,
}

/// One immutable analytics result produced by a single aggregation call.
/// Snapshots are persisted append-only; regeneration inserts a new row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub generated_at: DateTime<Utc>,

    // Consolidated JSON groups
    pub performance_metrics: PerformanceMetrics,
    pub learning_insights: LearningInsights,
    pub engagement_metrics: EngagementMetrics,
}

impl AnalyticsSnapshot {
    pub fn new(
        user_id: Uuid,
        performance_metrics: PerformanceMetrics,
        learning_insights: LearningInsights,
        engagement_metrics: EngagementMetrics,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            generated_at: Utc::now(),
            performance_metrics,
            learning_insights,
            engagement_metrics,
        }
    }
}
