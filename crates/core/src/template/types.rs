//! Template data types.

use dre_shared::types::TemplateId;
use serde::{Deserialize, Serialize};

/// A DRE template.
///
/// Deactivation is logical: an inactive template stays in the store but is
/// no longer offered to the section editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreTemplate {
    /// Template ID.
    pub id: TemplateId,
    /// Template name.
    pub name: String,
    /// Optional description; never an empty string.
    pub description: Option<String>,
    /// Whether the template is active.
    pub is_active: bool,
}
