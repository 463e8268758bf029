use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use quiztrack::models::Attempt;
use quiztrack::services::analytics::{
    build_snapshot, calculate_improvement_rate, calculate_overall_accuracy, calculate_study_streak,
    calculate_topics_accuracy, preferred_study_times, questions_per_session_avg,
    segment_sessions, session_duration_avg_minutes, session_frequency, split_topic_areas,
    suggested_review_intervals, SESSION_GAP_MS,
};

fn attempt_at(ts: DateTime<Utc>, is_correct: bool) -> Attempt {
    Attempt::new(Uuid::new_v4(), Uuid::new_v4(), "A".to_string(), is_correct, 5.0)
        .with_created_at(ts)
}

fn attempt_with_topic(ts: DateTime<Utc>, is_correct: bool, topic: &str) -> Attempt {
    attempt_at(ts, is_correct).with_topic(topic.to_string())
}

/// A local wall-clock time converted to the UTC instant attempts store
fn local_time(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

// =============================================================================
// Accuracy
// =============================================================================

#[test]
fn test_overall_accuracy_exact_ratio() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let attempts: Vec<Attempt> = (0..4)
        .map(|i| attempt_at(base - Duration::minutes(i), i < 3))
        .collect();
    assert!((calculate_overall_accuracy(&attempts) - 75.0).abs() < 1e-9);
}

#[test]
fn test_overall_accuracy_empty_is_zero() {
    assert_eq!(calculate_overall_accuracy(&[]), 0.0);
}

#[test]
fn test_topics_accuracy_groups_and_defaults() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let attempts = vec![
        attempt_with_topic(base, true, "algebra"),
        attempt_with_topic(base - Duration::minutes(1), false, "algebra"),
        // no topic metadata: grouped under "general"
        attempt_at(base - Duration::minutes(2), true),
    ];

    let accuracy = calculate_topics_accuracy(&attempts);
    assert_eq!(accuracy.len(), 2);
    assert!((accuracy["algebra"] - 50.0).abs() < 1e-9);
    assert!((accuracy["general"] - 100.0).abs() < 1e-9);
}

#[test]
fn test_improvement_rate_recent_minus_older() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    // Descending order: the first two (recent) correct, the last two wrong
    let attempts = vec![
        attempt_at(base, true),
        attempt_at(base - Duration::minutes(1), true),
        attempt_at(base - Duration::minutes(2), false),
        attempt_at(base - Duration::minutes(3), false),
    ];
    assert!((calculate_improvement_rate(&attempts) - 100.0).abs() < 1e-9);
}

#[test]
fn test_improvement_rate_empty_input_is_zero() {
    assert_eq!(calculate_improvement_rate(&[]), 0.0);
}

#[test]
fn test_improvement_rate_odd_split() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    // n = 3 splits into recent = 1, older = 2
    let attempts = vec![
        attempt_at(base, true),
        attempt_at(base - Duration::minutes(1), false),
        attempt_at(base - Duration::minutes(2), false),
    ];
    assert!((calculate_improvement_rate(&attempts) - 100.0).abs() < 1e-9);
}

// =============================================================================
// Session segmentation
// =============================================================================

#[test]
fn test_gap_of_exactly_thirty_minutes_is_same_session() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let attempts = vec![
        attempt_at(base + Duration::milliseconds(SESSION_GAP_MS), true),
        attempt_at(base, true),
    ];

    let sessions = segment_sessions(&attempts);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].questions, 2);
    assert_eq!(sessions[0].duration_ms, SESSION_GAP_MS);
}

#[test]
fn test_gap_one_ms_over_thirty_minutes_starts_new_session() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let attempts = vec![
        attempt_at(base + Duration::milliseconds(SESSION_GAP_MS + 1), true),
        attempt_at(base, true),
    ];

    let sessions = segment_sessions(&attempts);
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].questions, 1);
    assert_eq!(sessions[0].duration_ms, 0);
    assert_eq!(sessions[1].questions, 1);
}

#[test]
fn test_single_attempt_yields_one_zero_duration_session() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let sessions = segment_sessions(&[attempt_at(base, true)]);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].questions, 1);
    assert_eq!(sessions[0].duration_ms, 0);
}

#[test]
fn test_empty_input_yields_no_sessions() {
    assert!(segment_sessions(&[]).is_empty());
    assert_eq!(session_duration_avg_minutes(&[]), 0.0);
    assert_eq!(questions_per_session_avg(&[]), 0.0);
}

#[test]
fn test_session_averages() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    // One session of three attempts spaced 10 minutes apart, then a second
    // session of one attempt an hour earlier.
    let attempts = vec![
        attempt_at(base, true),
        attempt_at(base - Duration::minutes(10), true),
        attempt_at(base - Duration::minutes(20), true),
        attempt_at(base - Duration::minutes(90), true),
    ];

    let sessions = segment_sessions(&attempts);
    assert_eq!(sessions.len(), 2);
    // (20 minutes + 0 minutes) / 2 sessions
    assert!((session_duration_avg_minutes(&sessions) - 10.0).abs() < 1e-9);
    // (3 + 1) questions / 2 sessions
    assert!((questions_per_session_avg(&sessions) - 2.0).abs() < 1e-9);
}

// =============================================================================
// Study patterns
// =============================================================================

#[test]
fn test_preferred_times_ranked_by_frequency() {
    let attempts = vec![
        attempt_at(local_time(2025, 6, 2, 14, 0), true),
        attempt_at(local_time(2025, 6, 2, 9, 30), true),
        attempt_at(local_time(2025, 6, 2, 9, 15), true),
        attempt_at(local_time(2025, 6, 2, 9, 0), true),
        attempt_at(local_time(2025, 6, 2, 14, 5), true),
        attempt_at(local_time(2025, 6, 2, 21, 0), true),
    ];

    let times = preferred_study_times(&attempts);
    assert_eq!(times, vec!["9:00", "14:00", "21:00"]);
}

#[test]
fn test_preferred_times_ties_keep_first_appearance_order() {
    let attempts = vec![
        attempt_at(local_time(2025, 6, 2, 14, 0), true),
        attempt_at(local_time(2025, 6, 2, 9, 0), true),
        attempt_at(local_time(2025, 6, 2, 14, 10), true),
        attempt_at(local_time(2025, 6, 2, 9, 10), true),
    ];

    // Both hours occur twice; 14 appeared first in the walk
    let times = preferred_study_times(&attempts);
    assert_eq!(times, vec!["14:00", "9:00"]);
}

#[test]
fn test_preferred_times_empty_input() {
    assert!(preferred_study_times(&[]).is_empty());
}

// =============================================================================
// Topic classification
// =============================================================================

#[test]
fn test_exactly_seventy_percent_is_strong() {
    let mut accuracy = HashMap::new();
    accuracy.insert("chemistry".to_string(), 70.0);
    accuracy.insert("history".to_string(), 69.9);
    accuracy.insert("math".to_string(), 95.0);

    let (weak, strong) = split_topic_areas(&accuracy);
    assert_eq!(weak, vec!["history"]);
    assert_eq!(strong, vec!["chemistry", "math"]);
}

#[test]
fn test_review_intervals_weak_daily_strong_three_days() {
    let weak = vec!["history".to_string()];
    let strong = vec!["math".to_string()];

    let intervals = suggested_review_intervals(&weak, &strong);
    assert_eq!(intervals["history"], 24);
    assert_eq!(intervals["math"], 72);
}

// =============================================================================
// Streak and engagement
// =============================================================================

#[test]
fn test_streak_today_and_yesterday_is_two() {
    let now = Local::now();
    let today = now.date_naive();
    let attempts = vec![
        attempt_at(now.with_timezone(&Utc), true),
        attempt_at((now - Duration::days(1)).with_timezone(&Utc), true),
    ];

    assert_eq!(calculate_study_streak(&attempts, today), 2);
}

#[test]
fn test_streak_broken_by_three_day_gap() {
    let now = Local::now();
    let today = now.date_naive();
    let attempts = vec![attempt_at((now - Duration::days(3)).with_timezone(&Utc), true)];

    assert_eq!(calculate_study_streak(&attempts, today), 0);
}

#[test]
fn test_streak_stops_at_first_gap() {
    let now = Local::now();
    let today = now.date_naive();
    let attempts = vec![
        attempt_at(now.with_timezone(&Utc), true),
        attempt_at((now - Duration::days(1)).with_timezone(&Utc), true),
        // Two-day hole before this one: not part of the streak
        attempt_at((now - Duration::days(4)).with_timezone(&Utc), true),
    ];

    assert_eq!(calculate_study_streak(&attempts, today), 2);
}

#[test]
fn test_streak_empty_input_is_zero() {
    assert_eq!(calculate_study_streak(&[], Local::now().date_naive()), 0);
}

#[test]
fn test_session_frequency_zero_day_span() {
    let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    assert_eq!(session_frequency(3, now - Duration::hours(5), now), 0.0);
}

#[test]
fn test_session_frequency_per_day() {
    let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let oldest = now - Duration::days(2);
    assert!((session_frequency(4, oldest, now) - 2.0).abs() < 1e-9);
}

// =============================================================================
// Snapshot assembly
// =============================================================================

#[test]
fn test_build_snapshot_empty_attempts_degrades_to_zero() {
    let snapshot = build_snapshot(Uuid::new_v4(), &[], Utc::now());
    let perf = &snapshot.performance_metrics;
    let engagement = &snapshot.engagement_metrics;
    let insights = &snapshot.learning_insights;

    assert_eq!(perf.overall_accuracy, 0.0);
    assert!(perf.topics_accuracy.is_empty());
    assert_eq!(perf.improvement_rate, 0.0);
    assert!(perf.study_patterns.preferred_times.is_empty());
    assert_eq!(perf.study_patterns.session_duration_avg, 0.0);
    assert_eq!(perf.study_patterns.questions_per_session_avg, 0.0);
    assert!(perf.weak_areas.is_empty());
    assert!(perf.strong_areas.is_empty());

    assert!(insights.recommended_topics.is_empty());
    assert_eq!(insights.difficulty_progression, "increasing");
    assert!(insights.optimal_study_time.is_none());
    assert!(insights.suggested_review_intervals.is_empty());

    assert_eq!(engagement.study_streak, 0);
    assert_eq!(engagement.total_study_time, 0.0);
    assert_eq!(engagement.session_frequency, 0.0);
    assert!(engagement.last_active.is_none());

    // No NaN anywhere in the snapshot
    assert!(!perf.overall_accuracy.is_nan());
    assert!(!perf.improvement_rate.is_nan());
    assert!(!perf.study_patterns.session_duration_avg.is_nan());
    assert!(!engagement.session_frequency.is_nan());
}

#[test]
fn test_build_snapshot_populated() {
    let now = Local::now();
    let attempts = vec![
        attempt_with_topic(now.with_timezone(&Utc), true, "math"),
        attempt_with_topic(
            (now - Duration::minutes(5)).with_timezone(&Utc),
            true,
            "math",
        ),
        attempt_with_topic(
            (now - Duration::minutes(10)).with_timezone(&Utc),
            false,
            "history",
        ),
        attempt_with_topic(
            (now - Duration::minutes(15)).with_timezone(&Utc),
            false,
            "history",
        ),
    ];

    let snapshot = build_snapshot(Uuid::new_v4(), &attempts, now.with_timezone(&Utc));
    let perf = &snapshot.performance_metrics;

    assert!((perf.overall_accuracy - 50.0).abs() < 1e-9);
    assert_eq!(perf.weak_areas, vec!["history"]);
    assert_eq!(perf.strong_areas, vec!["math"]);
    // Recent half all correct, older half all wrong
    assert!((perf.improvement_rate - 100.0).abs() < 1e-9);

    let insights = &snapshot.learning_insights;
    assert_eq!(insights.recommended_topics, vec!["history"]);
    assert_eq!(insights.difficulty_progression, "increasing");
    assert_eq!(insights.suggested_review_intervals["history"], 24);
    assert_eq!(insights.suggested_review_intervals["math"], 72);

    let engagement = &snapshot.engagement_metrics;
    assert_eq!(engagement.last_active, Some(attempts[0].created_at));
    assert!(engagement.study_streak >= 1);
    // All four attempts fall into one 15-minute session
    assert!((engagement.total_study_time - 15.0).abs() < 1e-6);
}

#[test]
fn test_build_snapshot_negative_trend_label() {
    let base = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let attempts = vec![
        attempt_at(base, false),
        attempt_at(base - Duration::minutes(1), true),
    ];

    let snapshot = build_snapshot(Uuid::new_v4(), &attempts, base);
    assert!(snapshot.performance_metrics.improvement_rate < 0.0);
    assert_eq!(
        snapshot.learning_insights.difficulty_progression,
        "needs_improvement"
    );
}
