//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "QUIZTRACK_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "QUIZTRACK_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Database configuration
pub mod database {
    /// Override path of the SQLite database file
    pub const QUIZTRACK_DB: &str = "QUIZTRACK_DB";
}
