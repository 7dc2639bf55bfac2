//! Record store error types.

use thiserror::Error;
use uuid::Uuid;

use super::Table;

/// Record store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id exists in the table.
    #[error("record {id} not found in {table}")]
    NotFound {
        /// Table that was searched.
        table: Table,
        /// Requested record id.
        id: Uuid,
    },

    /// A record could not be converted to or from its typed form.
    #[error("invalid record in {table}: {reason}")]
    InvalidRecord {
        /// Table the record belongs to.
        table: Table,
        /// What was wrong with it.
        reason: String,
    },

    /// The backing store rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(table: Table, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            table,
            reason: reason.into(),
        }
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend(reason.into())
    }
}
