use thiserror::Error;

/// Custom error types for the QuizTrack application
#[derive(Error, Debug)]
pub enum QuizTrackError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text parsing error: {message}")]
    TextParsing { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Import error: {message}")]
    Import { message: String },

    #[error("Service error: {message}")]
    Service { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Already exists: {resource}")]
    AlreadyExists { resource: String },

    #[error("Time parsing error: {0}")]
    Time(#[from] chrono::ParseError),

    #[error("UUID parsing error: {0}")]
    Uuid(#[from] uuid::Error),

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl QuizTrackError {
    /// Create a text parsing error
    pub fn text_parsing<S: Into<String>>(message: S) -> Self {
        Self::TextParsing {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an import error
    pub fn import<S: Into<String>>(message: S) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    /// Create a service error
    pub fn service<S: Into<String>>(message: S) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an already exists error
    pub fn already_exists<S: Into<String>>(resource: S) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create an unknown error
    pub fn unknown<S: Into<String>>(message: S) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            QuizTrackError::Database(_) => "database",
            QuizTrackError::Io(_) => "io",
            QuizTrackError::Json(_) => "json",
            QuizTrackError::TextParsing { .. } => "text_parsing",
            QuizTrackError::InvalidConfig { .. } => "config",
            QuizTrackError::Import { .. } => "import",
            QuizTrackError::Service { .. } => "service",
            QuizTrackError::Validation { .. } => "validation",
            QuizTrackError::NotFound { .. } => "not_found",
            QuizTrackError::AlreadyExists { .. } => "already_exists",
            QuizTrackError::Time(_) => "time",
            QuizTrackError::Uuid(_) => "uuid",
            QuizTrackError::Unknown { .. } => "unknown",
        }
    }
}

/// Convert anyhow::Error to QuizTrackError
impl From<anyhow::Error> for QuizTrackError {
    fn from(err: anyhow::Error) -> Self {
        QuizTrackError::Unknown {
            message: err.to_string(),
        }
    }
}

/// Result type alias for QuizTrack
pub type Result<T> = std::result::Result<T, QuizTrackError>;
