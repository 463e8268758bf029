use anyhow::{Context, Result};
use uuid::Uuid;

use crate::database::config::get_default_db_path;
use crate::database::{AttemptRepository, DatabaseManager, QuestionRepository, UserRepository};
use crate::models::Attempt;

/// Days of history shown by `progress stats`
const DAILY_STATS_WINDOW_DAYS: i64 = 30;

pub async fn handle_record_command(
    user: String,
    question: String,
    answer: String,
    correct: bool,
    response_time: f64,
    topic: Option<String>,
) -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;

    let question_id = Uuid::parse_str(&question)
        .with_context(|| format!("Invalid question id: {question}"))?;

    let question_repo = QuestionRepository::new(db.clone());
    if question_repo.get(question_id)?.is_none() {
        anyhow::bail!("Question not found: {question_id}");
    }

    let user_repo = UserRepository::new(db.clone());
    let user = user_repo.get_or_create(&user)?;

    let mut attempt = Attempt::new(user.id, question_id, answer, correct, response_time);
    if let Some(topic) = topic {
        attempt = attempt.with_topic(topic);
    }
    if !attempt.is_valid() {
        anyhow::bail!("Response time must be non-negative");
    }

    let attempt_repo = AttemptRepository::new(db);
    attempt_repo.insert(&attempt)?;

    println!("✓ Attempt recorded for {}", user.username);
    Ok(())
}

pub async fn handle_stats_command(user: String) -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;

    let user_repo = UserRepository::new(db.clone());
    let Some(user) = user_repo.find_by_username(&user)? else {
        anyhow::bail!("User not found: {user}");
    };

    let attempt_repo = AttemptRepository::new(db);
    let overall = attempt_repo.overall_stats(user.id)?;
    let daily = attempt_repo.daily_stats(user.id, DAILY_STATS_WINDOW_DAYS)?;

    println!("Progress for {}:", user.username);
    println!("  Total answers:     {}", overall.total_answers);
    println!("  Correct answers:   {}", overall.correct_answers);
    println!("  Accuracy:          {:.1}%", overall.accuracy_percentage);
    println!("  Avg response time: {:.1}s", overall.avg_response_time_secs);

    if !daily.is_empty() {
        println!();
        println!("Last {DAILY_STATS_WINDOW_DAYS} days:");
        for day in daily {
            println!(
                "  {}  {} answers, {} correct, {:.1}s avg",
                day.date, day.answers, day.correct_answers, day.avg_response_time_secs
            );
        }
    }

    Ok(())
}
