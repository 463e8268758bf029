pub mod analytics;
pub mod attempt;
pub mod question;
pub mod user;

pub use analytics::{
    AnalyticsSnapshot, EngagementMetrics, LearningInsights, PerformanceMetrics, StudyPatterns,
};
pub use attempt::{Attempt, DEFAULT_TOPIC};
pub use question::Question;
pub use user::User;
