use anyhow::{Context, Result};

use crate::database::config::get_default_db_path;
use crate::database::connection::DatabaseManager;

pub async fn handle_init_command() -> Result<()> {
    println!("Initializing QuizTrack database...");

    let db_path = get_default_db_path()?;

    if db_path.exists() {
        println!("✓ Database already exists at: {}", db_path.display());
        return Ok(());
    }

    let _db_manager =
        DatabaseManager::new(&db_path).with_context(|| "Failed to create database manager")?;

    println!("✓ Database initialized successfully at: {}", db_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Import your questions:");
    println!("     quiztrack question import <path>");
    println!();
    println!("  2. Record answer attempts:");
    println!("     quiztrack progress record --user <name> --question <id> \\");
    println!("       --answer <text> --correct --response-time <secs>");
    println!();
    println!("  3. Generate analytics:");
    println!("     quiztrack analytics generate --user <name>");

    Ok(())
}
