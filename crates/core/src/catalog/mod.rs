//! Categories and indicators consumed by the DRE editors.
//!
//! Both are read-only from this crate's point of view: they are only listed,
//! filtered for pickers, and referenced by id.

pub mod filter;
pub mod service;
pub mod types;

pub use filter::{filter_categories, filter_indicators, matches_search};
pub use service::CatalogService;
pub use types::{Category, CategoryType, Indicator};
