//! Test doubles shared by the editor tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::store::{Query, Record, RecordStore, StoreError, Table};

/// Store whose every call fails, as if the backend were unreachable.
pub struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn query(&self, _: Table, _: &Query) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn insert(&self, _: Table, _: Record) -> Result<Record, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn update(&self, _: Table, _: Uuid, _: Record) -> Result<Record, StoreError> {
        Err(StoreError::backend("connection refused"))
    }
}
