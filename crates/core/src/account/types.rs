//! Account data types.

use std::fmt;

use dre_shared::types::{AccountId, CategoryId, CompanyId, IndicatorId};
use serde::{Deserialize, Serialize};

use crate::store::{StoreError, Table};

/// Type tag of an account as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Sum of revenue categories.
    Revenue,
    /// Sum of expense categories.
    Expense,
    /// Value of one indicator.
    Indicator,
    /// Sum of other accounts.
    Total,
    /// Manual entry with no backing data.
    Blank,
}

impl AccountType {
    /// Returns the string representation of the account type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Indicator => "indicator",
            Self::Total => "total",
            Self::Blank => "blank",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sign of a blank account's manual entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Adds to the statement.
    #[default]
    Positive,
    /// Subtracts from the statement.
    Negative,
}

/// Account type with exactly the payload that type needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// Sum of revenue categories.
    Revenue {
        /// Source categories.
        category_ids: Vec<CategoryId>,
    },
    /// Sum of expense categories.
    Expense {
        /// Source categories.
        category_ids: Vec<CategoryId>,
    },
    /// Value of one indicator.
    Indicator {
        /// Source indicator.
        indicator_id: IndicatorId,
    },
    /// Sum of other accounts.
    Total {
        /// Accounts being summed.
        selected_accounts: Vec<AccountId>,
    },
    /// Manual entry line.
    Blank {
        /// Sign of the entry.
        sign: Sign,
    },
}

impl AccountKind {
    /// Returns the stored type tag.
    #[must_use]
    pub const fn account_type(&self) -> AccountType {
        match self {
            Self::Revenue { .. } => AccountType::Revenue,
            Self::Expense { .. } => AccountType::Expense,
            Self::Indicator { .. } => AccountType::Indicator,
            Self::Total { .. } => AccountType::Total,
            Self::Blank { .. } => AccountType::Blank,
        }
    }
}

/// A DRE account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreAccount {
    /// Account ID.
    pub id: AccountId,
    /// Account code, generated on creation.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Type and type-specific payload.
    pub kind: AccountKind,
    /// Position among siblings sharing the same parent.
    pub display_order: i32,
    /// Owning company.
    pub company_id: CompanyId,
    /// Whether the account is active.
    pub is_active: bool,
    /// Parent account within the same company.
    pub parent_account_id: Option<AccountId>,
}

/// Flat stored form of a [`DreAccount`].
///
/// Exactly one of `category_ids`, `indicator_id`, `selected_accounts`, and
/// `sign` is non-null, matching `account_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    /// Account ID.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Sibling position.
    pub display_order: i32,
    /// Owning company.
    pub company_id: CompanyId,
    /// Active flag.
    pub is_active: bool,
    /// Parent account.
    pub parent_account_id: Option<AccountId>,
    /// Revenue/expense payload.
    pub category_ids: Option<Vec<CategoryId>>,
    /// Indicator payload.
    pub indicator_id: Option<IndicatorId>,
    /// Total payload.
    pub selected_accounts: Option<Vec<AccountId>>,
    /// Blank payload.
    pub sign: Option<Sign>,
}

impl From<&DreAccount> for AccountRow {
    fn from(account: &DreAccount) -> Self {
        let mut row = Self {
            id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.kind.account_type(),
            display_order: account.display_order,
            company_id: account.company_id,
            is_active: account.is_active,
            parent_account_id: account.parent_account_id,
            category_ids: None,
            indicator_id: None,
            selected_accounts: None,
            sign: None,
        };
        match &account.kind {
            AccountKind::Revenue { category_ids } | AccountKind::Expense { category_ids } => {
                row.category_ids = Some(category_ids.clone());
            }
            AccountKind::Indicator { indicator_id } => row.indicator_id = Some(*indicator_id),
            AccountKind::Total { selected_accounts } => {
                row.selected_accounts = Some(selected_accounts.clone());
            }
            AccountKind::Blank { sign } => row.sign = Some(*sign),
        }
        row
    }
}

impl TryFrom<AccountRow> for DreAccount {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let kind = match row.account_type {
            AccountType::Revenue => AccountKind::Revenue {
                category_ids: row.category_ids.unwrap_or_default(),
            },
            AccountType::Expense => AccountKind::Expense {
                category_ids: row.category_ids.unwrap_or_default(),
            },
            AccountType::Indicator => AccountKind::Indicator {
                indicator_id: row.indicator_id.ok_or_else(|| {
                    StoreError::invalid_record(
                        Table::DreAccounts,
                        format!("indicator account {} has no indicator_id", row.id),
                    )
                })?,
            },
            AccountType::Total => AccountKind::Total {
                selected_accounts: row.selected_accounts.unwrap_or_default(),
            },
            AccountType::Blank => AccountKind::Blank {
                sign: row.sign.unwrap_or_default(),
            },
        };
        Ok(Self {
            id: row.id,
            code: row.code,
            name: row.name,
            kind,
            display_order: row.display_order,
            company_id: row.company_id,
            is_active: row.is_active,
            parent_account_id: row.parent_account_id,
        })
    }
}
