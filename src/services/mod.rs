pub mod analytics;
pub mod analytics_service;
pub mod question_service;

pub use analytics_service::AnalyticsService;
pub use question_service::{ImportSummary, QuestionService};
