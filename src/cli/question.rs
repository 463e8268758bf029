use anyhow::Result;

use crate::database::config::get_default_db_path;
use crate::database::{DatabaseManager, QuestionRepository};
use crate::parsers::{clean_question_text, parse_options};
use crate::services::QuestionService;

pub async fn handle_add_command(text: String, answer: Option<String>) -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;
    let service = QuestionService::new(db);

    let question = service.create_question(&text, answer)?;
    println!("✓ Question added: {}", question.id);

    let options = parse_options(&question.text_content);
    if options.is_empty() {
        println!("  Warning: no A)..D) options could be parsed from the text");
    } else {
        println!("  Parsed {} options", options.len());
    }

    Ok(())
}

pub async fn handle_import_command(path: String) -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;
    let service = QuestionService::new(db);

    println!("Importing questions from: {path}");
    let summary = service.import_file(&path)?;

    println!("✓ Imported {} questions", summary.imported);
    if summary.unusable > 0 {
        println!(
            "  Warning: {} questions have no parseable options",
            summary.unusable
        );
    }

    Ok(())
}

pub async fn handle_list_command() -> Result<()> {
    let db_path = get_default_db_path()?;
    let db = DatabaseManager::new(&db_path)?;
    let repo = QuestionRepository::new(db);

    let questions = repo.list_all()?;
    if questions.is_empty() {
        println!("No questions stored yet. Use 'quiztrack question import <path>'.");
        return Ok(());
    }

    println!("Found {} questions:", questions.len());
    println!();
    for question in questions {
        let stem = clean_question_text(&question.text_content);
        println!("{}  {}", question.id, stem);
        for option in parse_options(&question.text_content) {
            println!("    {}) {}", option.letter, option.text);
        }
    }

    Ok(())
}
