//! In-memory record store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use super::{Query, Record, RecordStore, StoreError, Table, record_id};

/// Record store kept in process memory.
///
/// Records keep insertion order, so unordered queries return them in the
/// order they were written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<Table, Vec<Record>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads records into `table` without counting them as writes.
    ///
    /// Records without an `id` get a fresh one.
    pub fn seed(&self, table: Table, records: impl IntoIterator<Item = Record>) {
        let mut rows = self.tables.entry(table).or_default();
        for mut record in records {
            ensure_id(&mut record);
            rows.push(record);
        }
    }

    /// Returns a snapshot of every record in `table`.
    #[must_use]
    pub fn records(&self, table: Table) -> Vec<Record> {
        self.tables
            .get(&table)
            .map(|rows| rows.value().clone())
            .unwrap_or_default()
    }

    /// Number of successful `insert` and `update` calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn ensure_id(record: &mut Record) -> Uuid {
    if let Some(id) = record_id(record) {
        return id;
    }
    let id = Uuid::now_v7();
    record.insert("id".to_string(), Value::String(id.to_string()));
    id
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query(&self, table: Table, query: &Query) -> Result<Vec<Record>, StoreError> {
        let mut found: Vec<Record> = self
            .tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();
        found.sort_by(|a, b| query.compare(a, b));
        Ok(found)
    }

    async fn insert(&self, table: Table, mut record: Record) -> Result<Record, StoreError> {
        let id = ensure_id(&mut record);
        let mut rows = self.tables.entry(table).or_default();
        if rows.iter().any(|r| record_id(r) == Some(id)) {
            return Err(StoreError::backend(format!(
                "duplicate key {id} in {table}"
            )));
        }
        rows.push(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn update(&self, table: Table, id: Uuid, patch: Record) -> Result<Record, StoreError> {
        let mut rows = self.tables.entry(table).or_default();
        let row = rows
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or(StoreError::NotFound { table, id })?;
        for (field, value) in patch {
            if field != "id" {
                row.insert(field, value);
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(row.clone())
    }
}
