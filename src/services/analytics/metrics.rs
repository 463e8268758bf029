use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::models::{StudySession, TopicTally};
use crate::models::{
    AnalyticsSnapshot, Attempt, EngagementMetrics, LearningInsights, PerformanceMetrics,
    StudyPatterns,
};

/// Gap between consecutive attempts that still counts as the same session
pub const SESSION_GAP_MS: i64 = 30 * 60 * 1000;

/// Topics below this accuracy percentage are classified weak
pub const WEAK_AREA_THRESHOLD: f64 = 70.0;

/// Review weak topics daily, strong topics every 3 days
pub const WEAK_REVIEW_INTERVAL_HOURS: u32 = 24;
pub const STRONG_REVIEW_INTERVAL_HOURS: u32 = 72;

/// How many preferred study hours to report
const PREFERRED_TIMES_LIMIT: usize = 3;

// =============================================================================
// Accuracy Metrics
// =============================================================================

/// Percentage of correct attempts, 0.0 for an empty slice
pub fn calculate_overall_accuracy(attempts: &[Attempt]) -> f64 {
    if attempts.is_empty() {
        return 0.0;
    }
    let correct = attempts.iter().filter(|a| a.is_correct).count();
    (correct as f64 / attempts.len() as f64) * 100.0
}

/// Per-topic accuracy percentage, grouped by topic label with attempts
/// missing topic metadata counted under "general"
pub fn calculate_topics_accuracy(attempts: &[Attempt]) -> HashMap<String, f64> {
    let mut tallies: HashMap<String, TopicTally> = HashMap::new();

    for attempt in attempts {
        let tally = tallies.entry(attempt.topic_label().to_string()).or_default();
        tally.total += 1;
        if attempt.is_correct {
            tally.correct += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(topic, tally)| (topic, tally.accuracy()))
        .collect()
}

/// Accuracy of the most recent half minus accuracy of the older half.
///
/// Expects `attempts` sorted by timestamp descending: the first
/// `floor(n/2)` entries are treated as recent, the rest as older. An empty
/// half contributes 0 instead of an undefined ratio.
pub fn calculate_improvement_rate(attempts: &[Attempt]) -> f64 {
    let mid = attempts.len() / 2;
    let recent_accuracy = calculate_overall_accuracy(&attempts[..mid]);
    let older_accuracy = calculate_overall_accuracy(&attempts[mid..]);
    recent_accuracy - older_accuracy
}

// =============================================================================
// Study Pattern Metrics
// =============================================================================

/// Up to three "H:00" labels for the local hours with the most attempts.
///
/// Hours are ranked by descending frequency with a stable sort, so ties keep
/// the order in which each distinct hour first appeared.
pub fn preferred_study_times(attempts: &[Attempt]) -> Vec<String> {
    let hours: Vec<u32> = attempts
        .iter()
        .map(|a| a.created_at.with_timezone(&Local).hour())
        .collect();

    let mut counts: HashMap<u32, u32> = HashMap::new();
    let mut distinct: Vec<u32> = Vec::new();
    for hour in &hours {
        if !counts.contains_key(hour) {
            distinct.push(*hour);
        }
        *counts.entry(*hour).or_insert(0) += 1;
    }

    distinct.sort_by(|a, b| counts[b].cmp(&counts[a]));
    distinct
        .into_iter()
        .take(PREFERRED_TIMES_LIMIT)
        .map(|hour| format!("{hour}:00"))
        .collect()
}

/// Segments attempts into study sessions.
///
/// Walks the slice in its given order (most recent first): while the gap
/// between the current attempt and the previous one stays within 30 minutes
/// the current session is extended, otherwise a new session starts. The last
/// open session is always appended; a single attempt yields one session with
/// duration 0.
pub fn segment_sessions(attempts: &[Attempt]) -> Vec<StudySession> {
    let Some(first) = attempts.first() else {
        return Vec::new();
    };

    let mut sessions = Vec::new();
    let mut current = StudySession::starting_at(first.created_at);

    for window in attempts.windows(2) {
        let gap_ms = (window[0].created_at - window[1].created_at).num_milliseconds();
        if gap_ms <= SESSION_GAP_MS {
            current.questions += 1;
            current.duration_ms += gap_ms;
        } else {
            sessions.push(current);
            current = StudySession::starting_at(window[1].created_at);
        }
    }
    sessions.push(current);

    sessions
}

/// Average session duration in minutes, 0.0 when there are no sessions
pub fn session_duration_avg_minutes(sessions: &[StudySession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total_ms: i64 = sessions.iter().map(|s| s.duration_ms).sum();
    total_ms as f64 / sessions.len() as f64 / 60_000.0
}

/// Average number of questions answered per session
pub fn questions_per_session_avg(sessions: &[StudySession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total_questions: u32 = sessions.iter().map(|s| s.questions).sum();
    total_questions as f64 / sessions.len() as f64
}

// =============================================================================
// Topic Classification
// =============================================================================

/// Partitions topics into (weak, strong) by the 70% accuracy boundary.
/// Exactly 70% is strong. Both lists are sorted for stable output.
pub fn split_topic_areas(topics_accuracy: &HashMap<String, f64>) -> (Vec<String>, Vec<String>) {
    let mut weak_areas = Vec::new();
    let mut strong_areas = Vec::new();

    for (topic, accuracy) in topics_accuracy {
        if *accuracy < WEAK_AREA_THRESHOLD {
            weak_areas.push(topic.clone());
        } else {
            strong_areas.push(topic.clone());
        }
    }

    weak_areas.sort();
    strong_areas.sort();
    (weak_areas, strong_areas)
}

/// Hours until each topic should be reviewed again: weak topics daily,
/// strong topics every three days
pub fn suggested_review_intervals(
    weak_areas: &[String],
    strong_areas: &[String],
) -> HashMap<String, u32> {
    let mut intervals = HashMap::new();
    for topic in weak_areas {
        intervals.insert(topic.clone(), WEAK_REVIEW_INTERVAL_HOURS);
    }
    for topic in strong_areas {
        intervals.insert(topic.clone(), STRONG_REVIEW_INTERVAL_HOURS);
    }
    intervals
}

// =============================================================================
// Engagement Metrics
// =============================================================================

/// Consecutive local calendar days with at least one attempt, counted
/// backward from `today`.
///
/// The streak is 0 when the most recent study day lies more than one day
/// before `today`; it stops at the first gap of more than one day between
/// study days.
pub fn calculate_study_streak(attempts: &[Attempt], today: NaiveDate) -> u32 {
    if attempts.is_empty() {
        return 0;
    }

    let mut days: Vec<NaiveDate> = attempts
        .iter()
        .map(|a| a.created_at.with_timezone(&Local).date_naive())
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut streak = 0u32;
    for (i, day) in days.iter().enumerate() {
        if i == 0 && (today - *day).num_days() > 1 {
            break;
        }

        streak += 1;

        if let Some(next) = days.get(i + 1) {
            if (*day - *next).num_days() > 1 {
                break;
            }
        }
    }

    streak
}

/// Sessions per whole day elapsed since the oldest attempt, 0.0 when
/// everything happened on the same day
pub fn session_frequency(
    session_count: usize,
    oldest: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let days_elapsed = (now - oldest).num_days();
    if days_elapsed > 0 {
        session_count as f64 / days_elapsed as f64
    } else {
        0.0
    }
}

// =============================================================================
// Snapshot Assembly
// =============================================================================

/// Builds a complete analytics snapshot from one user's attempts.
///
/// `attempts` must be sorted by timestamp descending (most recent first);
/// `AnalyticsService` sorts defensively before calling this. Pure
/// computation: every ratio degrades to 0 on an empty input, no NaN ever
/// reaches the snapshot.
pub fn build_snapshot(
    user_id: Uuid,
    attempts: &[Attempt],
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    let overall_accuracy = calculate_overall_accuracy(attempts);
    let topics_accuracy = calculate_topics_accuracy(attempts);
    let improvement_rate = calculate_improvement_rate(attempts);
    let preferred_times = preferred_study_times(attempts);

    let sessions = segment_sessions(attempts);
    let (weak_areas, strong_areas) = split_topic_areas(&topics_accuracy);

    let performance_metrics = PerformanceMetrics {
        overall_accuracy,
        topics_accuracy,
        improvement_rate,
        study_patterns: StudyPatterns {
            preferred_times: preferred_times.clone(),
            session_duration_avg: session_duration_avg_minutes(&sessions),
            questions_per_session_avg: questions_per_session_avg(&sessions),
        },
        weak_areas: weak_areas.clone(),
        strong_areas: strong_areas.clone(),
    };

    let learning_insights = LearningInsights {
        recommended_topics: weak_areas.clone(),
        difficulty_progression: if improvement_rate >= 0.0 {
            "increasing".to_string()
        } else {
            "needs_improvement".to_string()
        },
        optimal_study_time: preferred_times.first().cloned(),
        suggested_review_intervals: suggested_review_intervals(&weak_areas, &strong_areas),
    };

    let today = now.with_timezone(&Local).date_naive();
    let total_study_time: f64 = sessions.iter().map(StudySession::duration_minutes).sum();
    let frequency = attempts
        .last()
        .map(|oldest| session_frequency(sessions.len(), oldest.created_at, now))
        .unwrap_or(0.0);

    let engagement_metrics = EngagementMetrics {
        study_streak: calculate_study_streak(attempts, today),
        total_study_time,
        session_frequency: frequency,
        last_active: attempts.first().map(|a| a.created_at),
    };

    AnalyticsSnapshot::new(
        user_id,
        performance_metrics,
        learning_insights,
        engagement_metrics,
    )
}
