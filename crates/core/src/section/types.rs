//! Section data types.

use dre_shared::types::{CompanyId, SectionId, TemplateId};
use serde::{Deserialize, Serialize};

/// A DRE section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreSection {
    /// Section ID.
    pub id: SectionId,
    /// Section name.
    pub name: String,
    /// Section code.
    pub code: String,
    /// Owning company.
    pub company_id: CompanyId,
    /// Template the section belongs to, if any.
    pub template_id: Option<TemplateId>,
    /// Whether the section is active.
    pub is_active: bool,
}
