//! Core logic for DRE (income statement) structure editing.
//!
//! This crate holds the editors for templates, sections, lines, and accounts
//! together with their data model, validation rules, and hierarchy checks.
//! It has no database dependency: every editor talks to an injected
//! [`store::RecordStore`].
//!
//! # Modules
//!
//! - `template` - Statement templates
//! - `section` - Sections within a company's statement
//! - `line` - Section lines and their self-nesting
//! - `account` - Company accounts computed from categories, indicators, or other accounts
//! - `catalog` - Category and indicator reads for pickers
//! - `hierarchy` - Parent-link trees with cycle rejection
//! - `store` - Record store capability and the in-memory store

pub mod account;
pub mod catalog;
pub mod dialog;
pub mod error;
pub mod hierarchy;
pub mod line;
pub mod section;
pub mod store;
pub mod template;

#[cfg(test)]
mod testing;

pub use dialog::Dialog;
pub use error::{DreError, ErrorKind, Field, ValidationError};
pub use store::{MemoryStore, RecordStore, StoreError, Table};
