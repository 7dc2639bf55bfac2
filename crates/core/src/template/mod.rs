//! DRE templates: the root grouping for sections.

pub mod editor;
pub mod types;

pub use editor::TemplateEditor;
pub use types::DreTemplate;
