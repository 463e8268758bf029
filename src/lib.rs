pub mod cli;
pub mod database;
pub mod models;
pub mod parsers;
pub mod services;

pub mod env;
pub mod error;
pub mod logging;

pub use error::{QuizTrackError, Result};
pub use logging::{init_logging, LoggingConfig};
