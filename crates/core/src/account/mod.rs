//! DRE accounts: company-owned, self-nesting rows computed from categories,
//! an indicator, other accounts, or a manual signed entry.

pub mod code;
pub mod editor;
pub mod form;
pub mod types;

#[cfg(test)]
mod props;

pub use code::next_account_code;
pub use editor::{AccountEditor, next_display_order};
pub use form::{AccountForm, AccountFormType, missing_field, save_enabled};
pub use types::{AccountKind, AccountRow, AccountType, DreAccount, Sign};
