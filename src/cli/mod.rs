pub mod analytics;
pub mod init;
pub mod progress;
pub mod question;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(name = "quiztrack")]
#[command(about = "Study quiz progress tracking and analytics")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize application database
    Init,
    /// Manage quiz questions
    Question {
        #[command(subcommand)]
        command: QuestionCommands,
    },
    /// Record and inspect answer progress
    Progress {
        #[command(subcommand)]
        command: ProgressCommands,
    },
    /// Generate and inspect analytics snapshots
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommands,
    },
}

#[derive(Subcommand)]
pub enum QuestionCommands {
    /// Add a single question
    Add {
        /// Raw question text including A)..D) options
        text: String,
        /// Correct answer letter or text
        #[arg(short, long)]
        answer: Option<String>,
    },
    /// Import a question bank from a text file (blank-line separated blocks)
    Import {
        /// Path to the question bank file
        path: String,
    },
    /// List stored questions with their parsed options
    List,
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Record one answer attempt
    Record {
        /// Username the attempt belongs to
        #[arg(short, long)]
        user: String,
        /// Question ID that was answered
        #[arg(short, long)]
        question: String,
        /// The answer that was given
        #[arg(short, long)]
        answer: String,
        /// Whether the answer was correct
        #[arg(long)]
        correct: bool,
        /// Time taken to answer, in seconds
        #[arg(short, long)]
        response_time: f64,
        /// Topic label for per-topic accuracy
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// Show overall and daily progress statistics
    Stats {
        /// Username to show statistics for
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Generate and persist a fresh analytics snapshot
    Generate {
        /// Username to generate analytics for
        #[arg(short, long)]
        user: String,
    },
    /// Show the latest persisted analytics snapshot
    Show {
        /// Username to show analytics for
        #[arg(short, long)]
        user: String,
        /// Show all snapshots instead of only the latest
        #[arg(long)]
        history: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Init => init::handle_init_command().await,
                Commands::Question { command } => match command {
                    QuestionCommands::Add { text, answer } => {
                        question::handle_add_command(text, answer).await
                    }
                    QuestionCommands::Import { path } => {
                        question::handle_import_command(path).await
                    }
                    QuestionCommands::List => question::handle_list_command().await,
                },
                Commands::Progress { command } => match command {
                    ProgressCommands::Record {
                        user,
                        question,
                        answer,
                        correct,
                        response_time,
                        topic,
                    } => {
                        progress::handle_record_command(
                            user,
                            question,
                            answer,
                            correct,
                            response_time,
                            topic,
                        )
                        .await
                    }
                    ProgressCommands::Stats { user } => {
                        progress::handle_stats_command(user).await
                    }
                },
                Commands::Analytics { command } => match command {
                    AnalyticsCommands::Generate { user } => {
                        analytics::handle_generate_command(user).await
                    }
                    AnalyticsCommands::Show { user, history } => {
                        analytics::handle_show_command(user, history).await
                    }
                },
            }
        })
    }
}
