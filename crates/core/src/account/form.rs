//! Account form state.
//!
//! The form keeps one field per payload so the user can flip between types
//! while filling it in. Switching the type clears every payload the new type
//! does not own; [`AccountForm::kind`] then turns the remaining state into an
//! [`AccountKind`] carrying exactly one payload.

use std::fmt;

use dre_shared::types::{AccountId, CategoryId, IndicatorId};
use serde::{Deserialize, Serialize};

use super::types::{AccountKind, DreAccount, Sign};
use crate::catalog::CategoryType;
use crate::error::{Field, ValidationError};

/// Account type as offered by the form.
///
/// `Category` expands to a revenue or expense account through
/// [`AccountForm::category_type`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountFormType {
    /// Revenue or expense account summing categories.
    #[default]
    Category,
    /// Account reading one indicator.
    Indicator,
    /// Account summing other accounts.
    Total,
    /// Manual entry account.
    Blank,
}

impl AccountFormType {
    /// Returns the string representation of the form type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Indicator => "indicator",
            Self::Total => "total",
            Self::Blank => "blank",
        }
    }
}

impl fmt::Display for AccountFormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First field blocking a save, or `None` when the form can be saved.
///
/// Depends only on its arguments.
#[must_use]
pub fn missing_field(
    account_type: AccountFormType,
    name: &str,
    categories: &[CategoryId],
    indicator: Option<IndicatorId>,
    source_accounts: &[AccountId],
) -> Option<Field> {
    if name.is_empty() {
        return Some(Field::Name);
    }
    match account_type {
        AccountFormType::Category if categories.is_empty() => Some(Field::Categories),
        AccountFormType::Indicator if indicator.is_none() => Some(Field::Indicator),
        AccountFormType::Total if source_accounts.is_empty() => Some(Field::SourceAccounts),
        _ => None,
    }
}

/// Whether the save action is enabled.
#[must_use]
pub fn save_enabled(
    account_type: AccountFormType,
    name: &str,
    categories: &[CategoryId],
    indicator: Option<IndicatorId>,
    source_accounts: &[AccountId],
) -> bool {
    missing_field(account_type, name, categories, indicator, source_accounts).is_none()
}

/// Editable fields of the account editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    /// Selected type.
    pub account_type: AccountFormType,
    /// Revenue or expense, for category accounts.
    pub category_type: CategoryType,
    /// Account name.
    pub name: String,
    /// Selected categories, in selection order.
    pub selected_categories: Vec<CategoryId>,
    /// Selected indicator.
    pub selected_indicator: Option<IndicatorId>,
    /// Source accounts of a total, in selection order.
    pub selected_accounts: Vec<AccountId>,
    /// Parent account.
    pub parent_account_id: Option<AccountId>,
    /// Category picker search text.
    pub category_search: String,
    /// Indicator picker search text.
    pub indicator_search: String,
    /// Sign of a blank account.
    pub sign: Sign,
    /// Explicit display order; `None` keeps the stored or computed one.
    pub display_order: Option<i32>,
}

impl AccountForm {
    /// Loads the form from a stored account.
    #[must_use]
    pub fn from_account(account: &DreAccount) -> Self {
        let mut form = Self {
            name: account.name.clone(),
            parent_account_id: account.parent_account_id,
            ..Self::default()
        };
        match &account.kind {
            AccountKind::Revenue { category_ids } => {
                form.account_type = AccountFormType::Category;
                form.category_type = CategoryType::Revenue;
                form.selected_categories.clone_from(category_ids);
            }
            AccountKind::Expense { category_ids } => {
                form.account_type = AccountFormType::Category;
                form.category_type = CategoryType::Expense;
                form.selected_categories.clone_from(category_ids);
            }
            AccountKind::Indicator { indicator_id } => {
                form.account_type = AccountFormType::Indicator;
                form.selected_indicator = Some(*indicator_id);
            }
            AccountKind::Total { selected_accounts } => {
                form.account_type = AccountFormType::Total;
                form.selected_accounts.clone_from(selected_accounts);
            }
            AccountKind::Blank { sign } => {
                form.account_type = AccountFormType::Blank;
                form.sign = *sign;
            }
        }
        form
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Switches the type and clears the payloads the new type does not own.
    pub fn set_account_type(&mut self, account_type: AccountFormType) {
        if account_type != AccountFormType::Category {
            self.selected_categories.clear();
        }
        if account_type != AccountFormType::Indicator {
            self.selected_indicator = None;
        }
        if account_type != AccountFormType::Total {
            self.selected_accounts.clear();
        }
        if account_type != AccountFormType::Blank {
            self.sign = Sign::default();
        }
        self.account_type = account_type;
    }

    /// Selects `id` if unselected, otherwise unselects it.
    pub fn toggle_category(&mut self, id: CategoryId) {
        toggle(&mut self.selected_categories, id);
    }

    /// Adds or removes a source account of a total.
    pub fn toggle_source_account(&mut self, id: AccountId) {
        toggle(&mut self.selected_accounts, id);
    }

    /// Whether the save action is enabled for the current state.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.check().is_ok()
    }

    /// Checks the save guard.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Required` naming the first blocking field.
    pub fn check(&self) -> Result<(), ValidationError> {
        match missing_field(
            self.account_type,
            &self.name,
            &self.selected_categories,
            self.selected_indicator,
            &self.selected_accounts,
        ) {
            Some(field) => Err(ValidationError::Required(field)),
            None => Ok(()),
        }
    }

    /// The type and payload the form describes.
    ///
    /// # Errors
    ///
    /// Fails with the same error as [`AccountForm::check`].
    pub fn kind(&self) -> Result<AccountKind, ValidationError> {
        self.check()?;
        let kind = match self.account_type {
            AccountFormType::Category => match self.category_type {
                CategoryType::Revenue => AccountKind::Revenue {
                    category_ids: self.selected_categories.clone(),
                },
                CategoryType::Expense => AccountKind::Expense {
                    category_ids: self.selected_categories.clone(),
                },
            },
            AccountFormType::Indicator => AccountKind::Indicator {
                indicator_id: self
                    .selected_indicator
                    .ok_or(ValidationError::Required(Field::Indicator))?,
            },
            AccountFormType::Total => AccountKind::Total {
                selected_accounts: self.selected_accounts.clone(),
            },
            AccountFormType::Blank => AccountKind::Blank { sign: self.sign },
        };
        Ok(kind)
    }
}

fn toggle<T: PartialEq>(selection: &mut Vec<T>, id: T) {
    if let Some(pos) = selection.iter().position(|s| *s == id) {
        selection.remove(pos);
    } else {
        selection.push(id);
    }
}
