//! Editor lifecycle shared by every DRE editor.
//!
//! The valid transitions are:
//! - Closed → Create (open without a record)
//! - Closed → Edit (open with an existing record)
//! - Create/Edit → Closed (cancel, or a successful save)
//!
//! A failed save leaves the dialog where it was.

/// Open/closed state of an editor, carrying the record under edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog<T> {
    /// Not shown; the form holds no meaningful state.
    #[default]
    Closed,
    /// Open for a new record.
    Create,
    /// Open for an existing record.
    Edit(T),
}

impl<T> Dialog<T> {
    /// Returns true unless the dialog is closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Returns the record under edit, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&T> {
        match self {
            Self::Edit(record) => Some(record),
            _ => None,
        }
    }

    /// Opens the dialog for a new record.
    pub fn open_create(&mut self) {
        *self = Self::Create;
    }

    /// Opens the dialog for `record`.
    pub fn open_edit(&mut self, record: T) {
        *self = Self::Edit(record);
    }

    /// Closes the dialog.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }
}
