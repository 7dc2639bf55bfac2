//! Line data types.

use std::fmt;

use dre_shared::types::{CategoryId, LineId, SectionId};
use serde::{Deserialize, Serialize};

/// Type tag of a line as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Heading without values.
    #[default]
    Header,
    /// Sum of the selected categories.
    Category,
    /// Free-text formula over other lines.
    Calculation,
    /// Indicator value.
    Indicator,
    /// Partial total.
    Subtotal,
    /// Grand total.
    Total,
}

impl LineType {
    /// Returns the string representation of the line type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Category => "category",
            Self::Calculation => "calculation",
            Self::Indicator => "indicator",
            Self::Subtotal => "subtotal",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a line shows, with the payload its type needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Heading without values.
    Header,
    /// Sum of the referenced categories.
    Category {
        /// Referenced categories (dangling ids are possible).
        category_ids: Vec<CategoryId>,
    },
    /// Formula kept verbatim; never parsed here.
    Calculation {
        /// Formula text.
        formula: String,
    },
    /// Indicator value.
    Indicator,
    /// Partial total.
    Subtotal,
    /// Grand total.
    Total,
}

impl LineKind {
    /// Returns the stored type tag.
    #[must_use]
    pub const fn line_type(&self) -> LineType {
        match self {
            Self::Header => LineType::Header,
            Self::Category { .. } => LineType::Category,
            Self::Calculation { .. } => LineType::Calculation,
            Self::Indicator => LineType::Indicator,
            Self::Subtotal => LineType::Subtotal,
            Self::Total => LineType::Total,
        }
    }
}

/// A DRE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreLine {
    /// Line ID.
    pub id: LineId,
    /// Line name.
    pub name: String,
    /// Line code.
    pub code: String,
    /// Type and type-specific payload.
    pub kind: LineKind,
    /// Section the line belongs to.
    pub section_id: SectionId,
    /// Parent line within the same section.
    pub parent_id: Option<LineId>,
    /// Visual nesting depth. Independent of `parent_id`, and not bounded here.
    pub indent_level: i32,
    /// Whether a percentage column is shown.
    pub show_percentage: bool,
    /// Highlight color, expected as `#RRGGBB` but not validated.
    pub highlight_color: Option<String>,
    /// Whether the line is rendered bold.
    pub is_bold: bool,
    /// Whether the line is active.
    pub is_active: bool,
}

/// Flat stored form of a [`DreLine`].
///
/// `category_ids` is non-null only for category lines and `formula` only
/// for calculation lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRow {
    /// Line ID.
    pub id: LineId,
    /// Line name.
    pub name: String,
    /// Line code.
    pub code: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub line_type: LineType,
    /// Section ID.
    pub section_id: SectionId,
    /// Parent line ID.
    pub parent_id: Option<LineId>,
    /// Category payload.
    pub category_ids: Option<Vec<CategoryId>>,
    /// Calculation payload.
    pub formula: Option<String>,
    /// Visual nesting depth.
    #[serde(default)]
    pub indent_level: i32,
    /// Percentage column flag.
    #[serde(default)]
    pub show_percentage: bool,
    /// Highlight color.
    pub highlight_color: Option<String>,
    /// Bold flag.
    #[serde(default)]
    pub is_bold: bool,
    /// Active flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<&DreLine> for LineRow {
    fn from(line: &DreLine) -> Self {
        let (category_ids, formula) = match &line.kind {
            LineKind::Category { category_ids } => (Some(category_ids.clone()), None),
            LineKind::Calculation { formula } => (None, Some(formula.clone())),
            _ => (None, None),
        };
        Self {
            id: line.id,
            name: line.name.clone(),
            code: line.code.clone(),
            line_type: line.kind.line_type(),
            section_id: line.section_id,
            parent_id: line.parent_id,
            category_ids,
            formula,
            indent_level: line.indent_level,
            show_percentage: line.show_percentage,
            highlight_color: line.highlight_color.clone(),
            is_bold: line.is_bold,
            is_active: line.is_active,
        }
    }
}

impl From<LineRow> for DreLine {
    fn from(row: LineRow) -> Self {
        // Payloads of other types are ignored; a missing payload reads as empty.
        let kind = match row.line_type {
            LineType::Header => LineKind::Header,
            LineType::Category => LineKind::Category {
                category_ids: row.category_ids.unwrap_or_default(),
            },
            LineType::Calculation => LineKind::Calculation {
                formula: row.formula.unwrap_or_default(),
            },
            LineType::Indicator => LineKind::Indicator,
            LineType::Subtotal => LineKind::Subtotal,
            LineType::Total => LineKind::Total,
        };
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            kind,
            section_id: row.section_id,
            parent_id: row.parent_id,
            indent_level: row.indent_level,
            show_percentage: row.show_percentage,
            highlight_color: row.highlight_color,
            is_bold: row.is_bold,
            is_active: row.is_active,
        }
    }
}
