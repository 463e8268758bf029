use anyhow::Result;

use crate::database::config::get_default_db_path;
use crate::database::{DatabaseManager, UserRepository};
use crate::services::AnalyticsService;

pub async fn handle_generate_command(user: String) -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;

    let user_repo = UserRepository::new(db.clone());
    let Some(user) = user_repo.find_by_username(&user)? else {
        anyhow::bail!("User not found: {user}");
    };

    let service = AnalyticsService::new(db);
    let snapshot = service.generate_for_user(user.id).await?;

    println!("✓ Analytics snapshot generated for {}", user.username);
    println!(
        "  Overall accuracy:  {:.1}%",
        snapshot.performance_metrics.overall_accuracy
    );
    println!(
        "  Improvement rate:  {:+.1}",
        snapshot.performance_metrics.improvement_rate
    );
    println!(
        "  Study streak:      {} days",
        snapshot.engagement_metrics.study_streak
    );
    if !snapshot.performance_metrics.weak_areas.is_empty() {
        println!(
            "  Weak areas:        {}",
            snapshot.performance_metrics.weak_areas.join(", ")
        );
    }

    Ok(())
}

pub async fn handle_show_command(user: String, history: bool) -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;

    let user_repo = UserRepository::new(db.clone());
    let Some(user) = user_repo.find_by_username(&user)? else {
        anyhow::bail!("User not found: {user}");
    };

    let service = AnalyticsService::new(db);

    if history {
        let snapshots = service.history_for_user(user.id).await?;
        if snapshots.is_empty() {
            println!("No analytics snapshots yet. Run 'quiztrack analytics generate' first.");
            return Ok(());
        }
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    match service.latest_for_user(user.id).await? {
        Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        None => {
            println!("No analytics snapshots yet. Run 'quiztrack analytics generate' first.")
        }
    }

    Ok(())
}
