//! Catalog reads through the record store.

use std::sync::Arc;

use dre_shared::types::CompanyId;
use serde::de::DeserializeOwned;

use super::types::{Category, Indicator};
use crate::store::{Query, RecordStore, StoreError, Table, from_record};

/// Reads categories and indicators. Every call hits the store; nothing is cached.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
}

impl CatalogService {
    /// Creates a catalog reader over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every category, ordered by code.
    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.load(Table::Categories, Query::new().order_by("code"))
            .await
    }

    /// Categories of one company, ordered by code.
    pub async fn company_categories(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<Category>, StoreError> {
        self.load(
            Table::Categories,
            Query::new().eq("company_id", company_id).order_by("code"),
        )
        .await
    }

    /// Indicators of one company, ordered by code.
    pub async fn company_indicators(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<Indicator>, StoreError> {
        self.load(
            Table::Indicators,
            Query::new().eq("company_id", company_id).order_by("code"),
        )
        .await
    }

    async fn load<T: DeserializeOwned>(&self, table: Table, query: Query) -> Result<Vec<T>, StoreError> {
        self.store
            .query(table, &query)
            .await?
            .into_iter()
            .map(|record| from_record(table, record))
            .collect()
    }
}
