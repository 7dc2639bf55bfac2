//! DRE sections: company-owned groups of lines, optionally under a template.

pub mod editor;
pub mod types;

pub use editor::SectionEditor;
pub use types::DreSection;
