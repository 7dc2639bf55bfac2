//! PostgreSQL record store.
//!
//! Each record table holds `(id, data)` rows where `data` is the whole record
//! as a JSONB object. Filters and ordering address top-level keys of `data`;
//! every value is bound as a statement parameter.

use async_trait::async_trait;
use dre_core::store::{Filter, Query, Record, RecordStore, StoreError, Table, record_id};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, QueryResult, Statement, Value};
use tracing::debug;
use uuid::Uuid;

/// Record store backed by a SeaORM PostgreSQL connection.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    db: DatabaseConnection,
}

impl PgRecordStore {
    /// Creates a store over an open connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn query(&self, table: Table, query: &Query) -> Result<Vec<Record>, StoreError> {
        let rows = self
            .db
            .query_all(select_statement(table, query))
            .await
            .map_err(backend)?;
        debug!(%table, rows = rows.len(), "Queried records");
        rows.iter().map(|row| read_data(table, row)).collect()
    }

    async fn insert(&self, table: Table, mut record: Record) -> Result<Record, StoreError> {
        let id = match record.get("id") {
            None | Some(serde_json::Value::Null) => {
                let id = Uuid::now_v7();
                record.insert("id".to_string(), serde_json::Value::from(id.to_string()));
                id
            }
            Some(_) => record_id(&record)
                .ok_or_else(|| StoreError::invalid_record(table, "id is not a UUID"))?,
        };
        let row = self
            .db
            .query_one(insert_statement(table, id, record))
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::backend(format!("insert into {table} returned no row")))?;
        read_data(table, &row)
    }

    async fn update(&self, table: Table, id: Uuid, patch: Record) -> Result<Record, StoreError> {
        let row = self
            .db
            .query_one(update_statement(table, id, patch))
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound { table, id })?;
        read_data(table, &row)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn backend(err: DbErr) -> StoreError {
    StoreError::backend(err.to_string())
}

fn read_data(table: Table, row: &QueryResult) -> Result<Record, StoreError> {
    match row.try_get::<serde_json::Value>("", "data").map_err(backend)? {
        serde_json::Value::Object(record) => Ok(record),
        other => Err(StoreError::invalid_record(
            table,
            format!("expected an object, got {other}"),
        )),
    }
}

/// Numbered placeholders and their bound values.
#[derive(Default)]
struct Params {
    values: Vec<Value>,
}

impl Params {
    fn push(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }
}

fn select_statement(table: Table, query: &Query) -> Statement {
    let mut params = Params::default();
    let mut sql = format!("SELECT data FROM {table}");

    let conditions: Vec<String> = query
        .filters
        .iter()
        .map(|filter| match filter {
            Filter::Eq(field, value) => {
                let field = params.push(field.clone());
                let value = params.push(value.clone());
                format!("data -> {field} = {value}::jsonb")
            }
            Filter::IsNull(field) => {
                let field = params.push(field.clone());
                format!("coalesce(data -> {field}, 'null'::jsonb) = 'null'::jsonb")
            }
        })
        .collect();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    match &query.order_by {
        Some(field) => {
            let field = params.push(field.clone());
            sql.push_str(&format!(
                " ORDER BY data -> {field} ASC NULLS FIRST, created_at, id"
            ));
        }
        None => sql.push_str(" ORDER BY created_at, id"),
    }

    Statement::from_sql_and_values(DbBackend::Postgres, sql, params.values)
}

fn insert_statement(table: Table, id: Uuid, record: Record) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        format!("INSERT INTO {table} (id, data) VALUES ($1, $2::jsonb) RETURNING data"),
        [id.into(), serde_json::Value::Object(record).into()],
    )
}

fn update_statement(table: Table, id: Uuid, patch: Record) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        format!(
            "UPDATE {table} SET data = data || $2::jsonb, updated_at = now() WHERE id = $1 RETURNING data"
        ),
        [id.into(), serde_json::Value::Object(patch).into()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn values(statement: &Statement) -> Vec<Value> {
        statement
            .values
            .as_ref()
            .map(|v| v.0.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_unfiltered_select() {
        let statement = select_statement(Table::DreTemplates, &Query::new());
        assert_eq!(
            statement.sql,
            "SELECT data FROM dre_templates ORDER BY created_at, id"
        );
        assert!(values(&statement).is_empty());
    }

    #[test]
    fn test_filters_and_order_are_bound() {
        let query = Query::new()
            .eq("company_id", "c-1")
            .eq("is_active", true)
            .order_by("display_order");

        let statement = select_statement(Table::DreAccounts, &query);

        assert_eq!(
            statement.sql,
            "SELECT data FROM dre_accounts WHERE data -> $1 = $2::jsonb AND data -> $3 = $4::jsonb \
             ORDER BY data -> $5 ASC NULLS FIRST, created_at, id"
        );
        let values = values(&statement);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], Value::from("company_id".to_string()));
        assert_eq!(values[1], Value::from(json!("c-1")));
        assert_eq!(values[3], Value::from(json!(true)));
        assert_eq!(values[4], Value::from("display_order".to_string()));
    }

    #[rstest]
    #[case(Query::new().is_null("parent_id"))]
    #[case(Query::new().eq("parent_id", Option::<String>::None))]
    fn test_null_filter_matches_missing_or_null(#[case] query: Query) {
        let statement = select_statement(Table::DreLines, &query);
        assert!(statement.sql.contains("coalesce(data -> $1, 'null'::jsonb) = 'null'::jsonb"));
        assert_eq!(values(&statement).len(), 1);
    }

    #[test]
    fn test_update_merges_patch() {
        let id = Uuid::now_v7();
        let mut patch = Record::new();
        patch.insert("is_active".into(), json!(false));

        let statement = update_statement(Table::DreLines, id, patch);

        assert!(statement.sql.starts_with("UPDATE dre_lines SET data = data || $2::jsonb"));
        assert!(statement.sql.ends_with("WHERE id = $1 RETURNING data"));
        let values = values(&statement);
        assert_eq!(values[0], Value::from(id));
        assert_eq!(values[1], Value::from(json!({ "is_active": false })));
    }

    #[test]
    fn test_insert_binds_id_and_document() {
        let id = Uuid::now_v7();
        let mut record = Record::new();
        record.insert("id".into(), json!(id.to_string()));
        record.insert("name".into(), json!("DRE Gerencial"));

        let statement = insert_statement(Table::DreTemplates, id, record);

        assert_eq!(
            statement.sql,
            "INSERT INTO dre_templates (id, data) VALUES ($1, $2::jsonb) RETURNING data"
        );
        assert_eq!(values(&statement)[0], Value::from(id));
    }
}
