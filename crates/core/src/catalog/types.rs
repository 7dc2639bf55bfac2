//! Catalog data types.

use dre_shared::types::{CategoryId, CompanyId, IndicatorId};
use serde::{Deserialize, Serialize};

/// Whether a category books revenue or expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Revenue category.
    #[default]
    Revenue,
    /// Expense category.
    Expense,
}

impl CategoryType {
    /// Returns the string representation of the category type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

/// A financial category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Category code (catalog sort key).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Owning company.
    pub company_id: CompanyId,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// A financial indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Indicator ID.
    pub id: IndicatorId,
    /// Indicator code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Owning company.
    pub company_id: CompanyId,
}
