//! Parent links between DRE lines and between DRE accounts.
//!
//! Both hierarchies are self-referencing: a line may sit under another line
//! of the same section, an account under another account of the same
//! company. Writes that would make a node its own ancestor are rejected.

pub mod error;
pub mod tree;

#[cfg(test)]
mod props;

pub use error::HierarchyError;
pub use tree::ParentTree;
