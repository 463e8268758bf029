pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use metrics::*;
pub use models::*;
