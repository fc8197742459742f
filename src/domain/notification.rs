//! Append-only collector for validation failures.

use tracing::debug;

use super::error::ValidationError;

/// Accumulates validation failures for a single request.
///
/// Failures only accumulate; there is no way to clear them. `is_valid` is
/// true while nothing has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    errors: Vec<ValidationError>,
}

impl Notification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn add(&mut self, error: ValidationError) {
        debug!(error = %error, "Validation failure recorded");
        self.errors.push(error);
    }

    /// Unwrap a validation result, recording the error and yielding `None` on failure.
    pub fn capture<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(error);
                None
            }
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
