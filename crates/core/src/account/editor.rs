//! Account editor.

use std::sync::Arc;

use dre_shared::config::DreConfig;
use dre_shared::types::{AccountId, CompanyId};
use tracing::{debug, error, info, warn};

use super::code::next_account_code;
use super::form::AccountForm;
use super::types::{AccountRow, AccountType, DreAccount};
use crate::catalog::{CatalogService, Category, Indicator, filter_categories, filter_indicators};
use crate::dialog::Dialog;
use crate::error::DreError;
use crate::hierarchy::ParentTree;
use crate::store::{
    Query, RecordStore, StoreError, Table, deactivate_record, from_record, save_record, to_record,
};

const DEFAULT_CODE_PREFIX: &str = "A";

/// Display order for a new account under `parent`: one past the highest
/// order among accounts sharing that parent, or 1 when there are none.
#[must_use]
pub fn next_display_order(accounts: &[DreAccount], parent: Option<AccountId>) -> i32 {
    accounts
        .iter()
        .filter(|a| a.parent_account_id == parent)
        .map(|a| a.display_order)
        .max()
        .map_or(1, |order| order.saturating_add(1))
}

/// Creates and edits the DRE accounts of one company.
///
/// Opening the editor loads the company's categories, indicators, and
/// accounts; the pickers filter those lists without touching the selection.
pub struct AccountEditor {
    store: Arc<dyn RecordStore>,
    catalog: CatalogService,
    company_id: CompanyId,
    code_prefix: String,
    dialog: Dialog<DreAccount>,
    categories: Vec<Category>,
    indicators: Vec<Indicator>,
    accounts: Vec<DreAccount>,
    /// Form state.
    pub form: AccountForm,
}

impl AccountEditor {
    /// Creates a closed editor for accounts of `company_id`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, company_id: CompanyId) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            store,
            company_id,
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            dialog: Dialog::Closed,
            categories: Vec::new(),
            indicators: Vec::new(),
            accounts: Vec::new(),
            form: AccountForm::default(),
        }
    }

    /// Uses the code prefix from configuration.
    #[must_use]
    pub fn with_config(mut self, config: &DreConfig) -> Self {
        self.code_prefix.clone_from(&config.account_code_prefix);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn dialog(&self) -> &Dialog<DreAccount> {
        &self.dialog
    }

    /// Company accounts as loaded on open, ordered by display order.
    #[must_use]
    pub fn accounts(&self) -> &[DreAccount] {
        &self.accounts
    }

    /// Opens the editor with a default form.
    pub async fn open_create(&mut self) {
        self.form.reset();
        self.dialog.open_create();
        self.load_options().await;
    }

    /// Opens the editor on an existing account.
    pub async fn open_edit(&mut self, account: DreAccount) {
        self.form = AccountForm::from_account(&account);
        self.dialog.open_edit(account);
        self.load_options().await;
    }

    /// Closes the editor without writing.
    pub fn cancel(&mut self) {
        self.dialog.close();
    }

    async fn load_options(&mut self) {
        self.categories = self
            .catalog
            .company_categories(self.company_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, company_id = %self.company_id, "Failed to load categories");
                Vec::new()
            });
        self.indicators = self
            .catalog
            .company_indicators(self.company_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, company_id = %self.company_id, "Failed to load indicators");
                Vec::new()
            });
        self.accounts = self.company_accounts().await.unwrap_or_else(|e| {
            warn!(error = %e, company_id = %self.company_id, "Failed to load accounts");
            Vec::new()
        });
        debug!(
            categories = self.categories.len(),
            indicators = self.indicators.len(),
            accounts = self.accounts.len(),
            "Loaded account editor options"
        );
    }

    async fn company_accounts(&self) -> Result<Vec<DreAccount>, StoreError> {
        let query = Query::new()
            .eq("company_id", self.company_id)
            .order_by("display_order");
        self.store
            .query(Table::DreAccounts, &query)
            .await?
            .into_iter()
            .map(|record| DreAccount::try_from(from_record::<AccountRow>(Table::DreAccounts, record)?))
            .collect()
    }

    fn editing_id(&self) -> Option<AccountId> {
        self.dialog.editing().map(|a| a.id)
    }

    /// Categories of the selected category type matching the search text.
    #[must_use]
    pub fn category_options(&self) -> Vec<&Category> {
        filter_categories(
            &self.categories,
            self.company_id,
            self.form.category_type,
            &self.form.category_search,
        )
    }

    /// Indicators matching the search text.
    #[must_use]
    pub fn indicator_options(&self) -> Vec<&Indicator> {
        filter_indicators(&self.indicators, self.company_id, &self.form.indicator_search)
    }

    /// Accounts a total may sum: neither totals nor blanks, and never the
    /// account being edited.
    #[must_use]
    pub fn total_source_options(&self) -> Vec<&DreAccount> {
        let editing = self.editing_id();
        self.accounts
            .iter()
            .filter(|a| {
                a.company_id == self.company_id
                    && !matches!(a.kind.account_type(), AccountType::Total | AccountType::Blank)
                    && Some(a.id) != editing
            })
            .collect()
    }

    /// Accounts the edited account may hang under: anything but itself and
    /// its descendants.
    #[must_use]
    pub fn parent_options(&self) -> Vec<&DreAccount> {
        let excluded = match self.editing_id() {
            Some(id) => {
                let mut excluded = account_tree(&self.accounts).descendants(id);
                excluded.push(id);
                excluded
            }
            None => Vec::new(),
        };
        self.accounts
            .iter()
            .filter(|a| a.company_id == self.company_id && !excluded.contains(&a.id))
            .collect()
    }

    /// Builds the account the form describes against the given company
    /// accounts.
    ///
    /// New accounts get a fresh id, the next free code, and the next display
    /// order among their siblings. Edited accounts keep id, code, and display
    /// order unless the form sets an explicit order.
    ///
    /// # Errors
    ///
    /// Returns `DreError::Validation` when the save guard fails.
    pub fn build(&self, accounts: &[DreAccount]) -> Result<DreAccount, DreError> {
        let kind = self.form.kind()?;
        let parent = self.form.parent_account_id;
        let (id, code, display_order) = match self.dialog.editing() {
            Some(existing) => (existing.id, existing.code.clone(), existing.display_order),
            None => (
                AccountId::new(),
                next_account_code(&self.code_prefix, accounts.iter().map(|a| a.code.as_str())),
                next_display_order(accounts, parent),
            ),
        };

        Ok(DreAccount {
            id,
            code,
            name: self.form.name.clone(),
            kind,
            display_order: self.form.display_order.unwrap_or(display_order),
            company_id: self.company_id,
            is_active: true,
            parent_account_id: parent,
        })
    }

    /// Checks the guard and the parent link, then writes the account.
    ///
    /// The company's accounts are re-read before building so the generated
    /// code and display order reflect what is stored now. A successful create
    /// resets the form.
    pub async fn save(&mut self) -> Result<DreAccount, DreError> {
        if !self.dialog.is_open() {
            return Err(DreError::NotOpen);
        }
        self.form.check()?;

        let accounts = self.company_accounts().await.inspect_err(|e| {
            error!(error = %e, company_id = %self.company_id, "Failed to load company accounts");
        })?;
        let account = self.build(&accounts)?;
        account_tree(&accounts).ensure_acyclic(account.id, account.parent_account_id)?;

        let existing = self.editing_id();
        let saved = match self.write(existing, &account).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(error = %e, account_id = %account.id, "Failed to save DRE account");
                return Err(e.into());
            }
        };

        info!(
            account_id = %saved.id,
            code = %saved.code,
            account_type = %saved.kind.account_type(),
            company_id = %saved.company_id,
            "DRE account saved"
        );
        if existing.is_none() {
            self.form.reset();
        }
        self.accounts = accounts;
        match self.accounts.iter_mut().find(|a| a.id == saved.id) {
            Some(slot) => *slot = saved.clone(),
            None => self.accounts.push(saved.clone()),
        }
        self.dialog.close();
        Ok(saved)
    }

    async fn write(
        &self,
        existing: Option<AccountId>,
        account: &DreAccount,
    ) -> Result<DreAccount, StoreError> {
        let record = to_record(Table::DreAccounts, &AccountRow::from(account))?;
        let saved = save_record(
            self.store.as_ref(),
            Table::DreAccounts,
            existing.map(AccountId::into_inner),
            record,
        )
        .await?;
        DreAccount::try_from(from_record::<AccountRow>(Table::DreAccounts, saved)?)
    }

    /// Marks an account inactive.
    pub async fn deactivate(&self, id: AccountId) -> Result<DreAccount, DreError> {
        let saved = deactivate_record(self.store.as_ref(), Table::DreAccounts, id.into_inner())
            .await
            .inspect_err(|e| {
                error!(error = %e, account_id = %id, "Failed to deactivate DRE account");
            })?;
        Ok(DreAccount::try_from(from_record::<AccountRow>(
            Table::DreAccounts,
            saved,
        )?)?)
    }
}

fn account_tree(accounts: &[DreAccount]) -> ParentTree<AccountId> {
    ParentTree::from_links(accounts.iter().map(|a| (a.id, a.parent_account_id)))
}
