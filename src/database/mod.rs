pub mod analytics_repo;
pub mod attempt_repo;
pub mod config;
pub mod connection;
pub mod migrations;
pub mod question_repo;
pub mod schema;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepository;
pub use attempt_repo::{AttemptRepository, DailyProgressStats, OverallProgressStats};
pub use connection::DatabaseManager;
pub use question_repo::QuestionRepository;
pub use user_repo::UserRepository;
