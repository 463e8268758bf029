//! End-to-end flow: import questions, record attempts, inspect progress
//! stats, generate an analytics snapshot and read it back.

use chrono::{Duration, Utc};

use quiztrack::database::{
    AttemptRepository, DatabaseManager, QuestionRepository, UserRepository,
};
use quiztrack::models::Attempt;
use quiztrack::parsers::parse_options;
use quiztrack::services::{AnalyticsService, QuestionService};

#[tokio::test]
async fn test_full_study_flow() {
    let db = DatabaseManager::open_in_memory().unwrap();

    // Add two questions
    let question_service = QuestionService::new(db.clone());
    let q1 = question_service
        .create_question("What is 2+2?\nA) 3\nB) 4", Some("B".to_string()))
        .unwrap();
    let q2 = question_service
        .create_question("Capital of Italy?\nA) Rome\nB) Milan", Some("A".to_string()))
        .unwrap();
    assert_eq!(QuestionRepository::new(db.clone()).count().unwrap(), 2);

    // The stored questions render as usable quizzes
    assert_eq!(parse_options(&q1.text_content).len(), 2);
    assert_eq!(parse_options(&q2.text_content).len(), 2);

    // A user answers both, one correct and one wrong
    let user = UserRepository::new(db.clone()).get_or_create("carol").unwrap();
    let attempt_repo = AttemptRepository::new(db.clone());
    let now = Utc::now();

    attempt_repo
        .insert(
            &Attempt::new(user.id, q1.id, "B".to_string(), true, 4.0)
                .with_topic("math".to_string())
                .with_created_at(now - Duration::minutes(5)),
        )
        .unwrap();
    attempt_repo
        .insert(
            &Attempt::new(user.id, q2.id, "B".to_string(), false, 9.0)
                .with_topic("geography".to_string())
                .with_created_at(now),
        )
        .unwrap();

    // Progress stats computed in SQL
    let overall = attempt_repo.overall_stats(user.id).unwrap();
    assert_eq!(overall.total_answers, 2);
    assert_eq!(overall.correct_answers, 1);
    assert!((overall.accuracy_percentage - 50.0).abs() < 1e-9);
    assert!((overall.avg_response_time_secs - 6.5).abs() < 1e-9);

    let daily = attempt_repo.daily_stats(user.id, 30).unwrap();
    let total_daily_answers: u32 = daily.iter().map(|d| d.answers).sum();
    assert_eq!(total_daily_answers, 2);

    // Analytics snapshot generation and readback
    let analytics = AnalyticsService::new(db.clone());
    let snapshot = analytics.generate_for_user(user.id).await.unwrap();

    let perf = &snapshot.performance_metrics;
    assert!((perf.overall_accuracy - 50.0).abs() < 1e-9);
    assert!((perf.topics_accuracy["math"] - 100.0).abs() < 1e-9);
    assert!((perf.topics_accuracy["geography"] - 0.0).abs() < 1e-9);
    assert_eq!(perf.weak_areas, vec!["geography"]);
    assert_eq!(perf.strong_areas, vec!["math"]);

    // Both attempts are 5 minutes apart: one session
    assert!((perf.study_patterns.questions_per_session_avg - 2.0).abs() < 1e-9);

    assert_eq!(snapshot.engagement_metrics.last_active, Some(now));

    let latest = analytics.latest_for_user(user.id).await.unwrap().unwrap();
    assert_eq!(latest.id, snapshot.id);
}

#[tokio::test]
async fn test_unknown_user_has_isolated_analytics() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let users = UserRepository::new(db.clone());

    let alice = users.get_or_create("alice").unwrap();
    let bob = users.get_or_create("bob").unwrap();

    let analytics = AnalyticsService::new(db.clone());
    analytics.generate_for_user(alice.id).await.unwrap();

    // Bob never generated anything; Alice's snapshot stays hers
    assert!(analytics.latest_for_user(bob.id).await.unwrap().is_none());
    assert!(analytics.latest_for_user(alice.id).await.unwrap().is_some());
}
