//! DRE lines: the rows of a section, optionally nested under another line.

pub mod editor;
pub mod types;


pub use editor::LineEditor;
pub use types::{DreLine, LineKind, LineRow, LineType};
