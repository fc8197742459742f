//! Error types for the credit domain.

use thiserror::Error;

/// Top-level application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("External service error: {0}")]
    ExternalService(#[from] ExternalServiceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Input validation failures.
///
/// These are recorded in a [`super::Notification`] rather than returned to the
/// caller of the builder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Currency code '{0}' is not supported")]
    InvalidCurrency(String),

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(String),

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },
}

/// Failures of collaborators reached over I/O
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExternalServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Configuration loading failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
