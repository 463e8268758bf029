use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tracing::{info, warn};

use crate::database::{DatabaseManager, QuestionRepository};
use crate::error::{QuizTrackError, Result};
use crate::models::Question;
use crate::parsers::parse_options;

lazy_static! {
    /// Question blocks in an import file are separated by blank lines
    static ref BLOCK_SEPARATOR: Regex =
        Regex::new(r"\n[ \t]*\n").expect("block separator regex is valid");
}

/// Result of a question bank import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Questions stored
    pub imported: u32,
    /// Stored questions whose options could not be parsed; they render as
    /// unusable until their text is fixed
    pub unusable: u32,
}

pub struct QuestionService {
    db: DatabaseManager,
}

impl QuestionService {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    /// Store a single question after validating its text
    pub fn create_question(
        &self,
        text_content: &str,
        correct_answer: Option<String>,
    ) -> Result<Question> {
        if text_content.trim().is_empty() {
            return Err(QuizTrackError::validation(
                "text_content",
                "question text must not be empty",
            ));
        }

        let mut question = Question::new(text_content.to_string());
        if let Some(answer) = correct_answer {
            question = question.with_correct_answer(answer);
        }

        let repo = QuestionRepository::new(self.db.clone());
        repo.insert(&question).map_err(QuizTrackError::from)?;
        Ok(question)
    }

    /// Import a question bank from a text file. Blocks separated by blank
    /// lines become individual questions; the original block is kept as
    /// `raw_source`. Blocks with no parseable options are still stored but
    /// reported (and logged) as unusable.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportSummary> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question file: {}", path.display()))
            .map_err(QuizTrackError::from)?;

        let repo = QuestionRepository::new(self.db.clone());
        let mut summary = ImportSummary {
            imported: 0,
            unusable: 0,
        };

        for block in BLOCK_SEPARATOR.split(&content) {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }

            let question =
                Question::new(block.to_string()).with_raw_source(block.to_string());
            repo.insert(&question).map_err(QuizTrackError::from)?;
            summary.imported += 1;

            if parse_options(block).is_empty() {
                warn!(
                    question_id = %question.id,
                    "Imported question has no parseable options"
                );
                summary.unusable += 1;
            }
        }

        if summary.imported == 0 {
            return Err(QuizTrackError::import(format!(
                "no questions found in {}",
                path.display()
            )));
        }

        info!(
            file = %path.display(),
            imported = summary.imported,
            unusable = summary.unusable,
            "Question import finished"
        );
        Ok(summary)
    }
}
