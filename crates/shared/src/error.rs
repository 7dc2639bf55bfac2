//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Presentation layers map these to localized messages through
/// [`AppError::error_code`]; the display text is for logs only.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (a required field is missing or a rule is broken).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for presentation layers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "PERSISTENCE_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), "VALIDATION_FAILED")]
    #[case(AppError::NotFound(String::new()), "NOT_FOUND")]
    #[case(AppError::Database(String::new()), "PERSISTENCE_FAILED")]
    #[case(AppError::Internal(String::new()), "INTERNAL_ERROR")]
    fn test_error_codes(#[case] error: AppError, #[case] expected: &str) {
        assert_eq!(error.error_code(), expected);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("name".into()).to_string(),
            "Validation error: name"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Database("msg".into()).to_string(),
            "Database error: msg"
        );
    }
}
