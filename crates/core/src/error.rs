//! Editor error types.
//!
//! Every failure is local to the open editor and recoverable: the user
//! fixes the form and saves again, or cancels. Presentation layers pick
//! localized text from [`ErrorKind`] and [`Field`]; the display strings here
//! are for logs.

use std::fmt;

use dre_shared::AppError;
use thiserror::Error;

use crate::hierarchy::HierarchyError;
use crate::store::StoreError;

/// Form fields a validation error can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Record name.
    Name,
    /// Record code.
    Code,
    /// Category selection of a category account or line.
    Categories,
    /// Indicator selection of an indicator account.
    Indicator,
    /// Source accounts of a total account.
    SourceAccounts,
    /// Parent link.
    Parent,
}

impl Field {
    /// Returns the field name as used in records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
            Self::Categories => "category_ids",
            Self::Indicator => "indicator_id",
            Self::SourceAccounts => "selected_accounts",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{0} is required")]
    Required(Field),

    /// The parent link would create a cycle.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

impl ValidationError {
    /// The form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Required(field) => *field,
            Self::Hierarchy(_) => Field::Parent,
        }
    }
}

/// Coarse error classification for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The form is incomplete; nothing was written.
    ValidationFailed,
    /// The record store failed; nothing was written.
    PersistenceFailed,
    /// The editor was not open.
    InvalidState,
}

/// Errors returned by editor operations.
#[derive(Debug, Error)]
pub enum DreError {
    /// The form did not pass validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The record store operation failed.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// Save was requested while the editor was closed.
    #[error("editor is not open")]
    NotOpen,
}

impl DreError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Persistence(_) => ErrorKind::PersistenceFailed,
            Self::NotOpen => ErrorKind::InvalidState,
        }
    }
}

impl From<HierarchyError> for DreError {
    fn from(err: HierarchyError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<DreError> for AppError {
    fn from(err: DreError) -> Self {
        let message = err.to_string();
        match err {
            DreError::Validation(_) => Self::Validation(message),
            DreError::Persistence(StoreError::NotFound { table, id }) => {
                Self::NotFound(format!("{table}/{id}"))
            }
            DreError::Persistence(_) => Self::Database(message),
            DreError::NotOpen => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Table;
    use uuid::Uuid;

    #[test]
    fn test_kinds() {
        assert_eq!(
            DreError::from(ValidationError::Required(Field::Name)).kind(),
            ErrorKind::ValidationFailed
        );
        assert_eq!(
            DreError::from(StoreError::backend("connection reset")).kind(),
            ErrorKind::PersistenceFailed
        );
        assert_eq!(DreError::NotOpen.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_hierarchy_errors_point_at_parent() {
        let err = ValidationError::from(HierarchyError::SelfParent { node: "x".into() });
        assert_eq!(err.field(), Field::Parent);
    }

    #[test]
    fn test_required_display() {
        assert_eq!(
            ValidationError::Required(Field::Code).to_string(),
            "code is required"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = DreError::from(ValidationError::Required(Field::Name)).into();
        assert_eq!(app.error_code(), "VALIDATION_FAILED");

        let app: AppError = DreError::from(StoreError::NotFound {
            table: Table::DreLines,
            id: Uuid::nil(),
        })
        .into();
        assert_eq!(app.error_code(), "NOT_FOUND");

        let app: AppError = DreError::from(StoreError::backend("timeout")).into();
        assert_eq!(app.error_code(), "PERSISTENCE_FAILED");
    }
}
