//! Error types.
//!
//! - `InsightError` is what the pipeline returns. Each variant maps to one
//!   failure class a caller can act on.
//! - `AppError` is what the `insights` binary exits with (message + exit code).

/// Failures surfaced by the CSV-to-insights pipeline.
///
/// Row-level coercion problems never show up here: those rows are dropped and
/// counted during ingest.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InsightError {
    /// The location could not be fetched/read or is not delimited text.
    #[error("{0}")]
    SourceUnavailable(String),

    /// A required column is absent from the header row.
    #[error("Missing required column: '{0}'")]
    SchemaError(String),

    /// Fitting was attempted on an empty or too-small record set.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A numeric input is outside the function's domain.
    #[error("{0}")]
    DomainError(String),

    /// A required request parameter is missing or malformed.
    #[error("{0}")]
    ValidationError(String),

    /// The worker running the pipeline did not complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InsightError {
    /// HTTP status used when this error reaches the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            InsightError::ValidationError(_) => 400,
            _ => 500,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            InsightError::SchemaError(_) | InsightError::ValidationError(_) => 2,
            InsightError::InsufficientData(_) | InsightError::DomainError(_) => 3,
            InsightError::SourceUnavailable(_) => 4,
            InsightError::Internal(_) => 1,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<InsightError> for AppError {
    fn from(err: InsightError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
