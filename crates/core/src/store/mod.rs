//! Record store capability shared by every editor.
//!
//! Editors never talk to a database directly. They receive an
//! `Arc<dyn RecordStore>` and issue `query`, `insert`, and `update` calls
//! against named tables. `dre-db` provides the PostgreSQL implementation;
//! [`MemoryStore`] backs tests and dry runs.

mod error;
mod memory;
mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use types::{Filter, Query, Record, Table, from_record, record_id, to_record};

use async_trait::async_trait;
use uuid::Uuid;

/// Create, update, and query records by table and filter.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record of `table` matching `query`, in query order.
    async fn query(&self, table: Table, query: &Query) -> Result<Vec<Record>, StoreError>;

    /// Inserts a record and returns it as stored.
    ///
    /// An `id` is assigned when the record does not carry one.
    async fn insert(&self, table: Table, record: Record) -> Result<Record, StoreError>;

    /// Shallow-merges `patch` into the record with the given id and returns
    /// the updated record.
    async fn update(&self, table: Table, id: Uuid, patch: Record) -> Result<Record, StoreError>;
}

/// Writes `record` as an update when `existing` is set, otherwise as an insert.
pub(crate) async fn save_record(
    store: &dyn RecordStore,
    table: Table,
    existing: Option<Uuid>,
    mut record: Record,
) -> Result<Record, StoreError> {
    match existing {
        Some(id) => {
            record.remove("id");
            store.update(table, id, record).await
        }
        None => store.insert(table, record).await,
    }
}

/// Marks a record inactive. Records are never deleted.
pub(crate) async fn deactivate_record(
    store: &dyn RecordStore,
    table: Table,
    id: Uuid,
) -> Result<Record, StoreError> {
    let mut patch = Record::new();
    patch.insert("is_active".to_string(), serde_json::Value::Bool(false));
    store.update(table, id, patch).await
}
