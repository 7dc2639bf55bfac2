//! Tables, records, and queries understood by every record store.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use super::StoreError;

/// A stored record: a JSON object keyed by snake_case field names.
pub type Record = serde_json::Map<String, Value>;

/// Tables the editors read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Financial categories (read-only catalog).
    Categories,
    /// Financial indicators (read-only catalog).
    Indicators,
    /// DRE templates.
    DreTemplates,
    /// DRE sections.
    DreSections,
    /// DRE lines.
    DreLines,
    /// DRE accounts.
    DreAccounts,
}

impl Table {
    /// Every table, in schema creation order.
    pub const ALL: [Self; 6] = [
        Self::Categories,
        Self::Indicators,
        Self::DreTemplates,
        Self::DreSections,
        Self::DreLines,
        Self::DreAccounts,
    ];

    /// Returns the table name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Indicators => "indicators",
            Self::DreTemplates => "dre_templates",
            Self::DreSections => "dre_sections",
            Self::DreLines => "dre_lines",
            Self::DreAccounts => "dre_accounts",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single equality condition on a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the given JSON value.
    Eq(String, Value),
    /// Field is absent or null.
    IsNull(String),
}

impl Filter {
    /// Returns true if `record` satisfies this condition.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Eq(field, value) => record.get(field) == Some(value),
            Self::IsNull(field) => record.get(field).is_none_or(Value::is_null),
        }
    }
}

/// Equality filters combined with AND, plus an optional ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Conditions every returned record satisfies.
    pub filters: Vec<Filter>,
    /// Field to sort by, ascending.
    pub order_by: Option<String>,
}

impl Query {
    /// Creates an unfiltered, unordered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition. A null value adds an "is null" condition.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let field = field.into();
        if value.is_null() {
            self.filters.push(Filter::IsNull(field));
        } else {
            self.filters.push(Filter::Eq(field, value));
        }
        self
    }

    /// Adds a "field is null" condition.
    #[must_use]
    pub fn is_null(mut self, field: impl Into<String>) -> Self {
        self.filters.push(Filter::IsNull(field.into()));
        self
    }

    /// Orders results by `field`, ascending.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Returns true if `record` satisfies every filter.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Compares two records on the order field; records missing it sort first.
    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let Some(field) = &self.order_by else {
            return Ordering::Equal;
        };
        compare_values(a.get(field), b.get(field))
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a.to_string().cmp(&b.to_string()),
        },
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

/// Serializes a typed row into a record.
///
/// # Errors
///
/// Returns `StoreError::InvalidRecord` if the row does not serialize to a JSON object.
pub fn to_record<T: Serialize>(table: Table, row: &T) -> Result<Record, StoreError> {
    match serde_json::to_value(row) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(StoreError::invalid_record(
            table,
            format!("expected an object, got {other}"),
        )),
        Err(e) => Err(StoreError::invalid_record(table, e.to_string())),
    }
}

/// Deserializes a record into a typed row.
///
/// # Errors
///
/// Returns `StoreError::InvalidRecord` if a field is missing or has the wrong shape.
pub fn from_record<T: DeserializeOwned>(table: Table, record: Record) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| StoreError::invalid_record(table, e.to_string()))
}

/// Reads the `id` field of a record.
#[must_use]
pub fn record_id(record: &Record) -> Option<Uuid> {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dre_shared::types::CompanyId;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::DreLines.as_str(), "dre_lines");
        assert_eq!(Table::DreAccounts.to_string(), "dre_accounts");
        assert_eq!(Table::ALL.len(), 6);
    }

    #[test]
    fn test_eq_filter_matches_exact_value() {
        let query = Query::new().eq("is_active", true);
        assert!(query.matches(&record(json!({"is_active": true}))));
        assert!(!query.matches(&record(json!({"is_active": false}))));
        assert!(!query.matches(&record(json!({}))));
    }

    #[test]
    fn test_eq_with_none_becomes_is_null() {
        let query = Query::new().eq("parent_id", Option::<String>::None);
        assert_eq!(query.filters, vec![Filter::IsNull("parent_id".into())]);
        assert!(query.matches(&record(json!({"parent_id": null}))));
        assert!(query.matches(&record(json!({}))));
        assert!(!query.matches(&record(json!({"parent_id": "x"}))));
    }

    #[test]
    fn test_eq_with_typed_id_matches_stored_string() {
        let company = CompanyId::new();
        let query = Query::new().eq("company_id", company);
        assert_eq!(
            query.filters,
            vec![Filter::Eq("company_id".into(), json!(company.to_string()))]
        );
        assert!(query.matches(&record(json!({"company_id": company.to_string()}))));
        assert!(!query.matches(&record(json!({"company_id": CompanyId::new().to_string()}))));
    }

    #[test]
    fn test_compare_orders_strings_and_numbers() {
        let query = Query::new().order_by("code");
        let a = record(json!({"code": "1.01"}));
        let b = record(json!({"code": "1.02"}));
        assert_eq!(query.compare(&a, &b), Ordering::Less);

        let query = Query::new().order_by("display_order");
        let a = record(json!({"display_order": 10}));
        let b = record(json!({"display_order": 9}));
        assert_eq!(query.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_missing_order_field_sorts_first() {
        let query = Query::new().order_by("name");
        let a = record(json!({}));
        let b = record(json!({"name": "Receita"}));
        assert_eq!(query.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_record_id() {
        let id = Uuid::new_v4();
        assert_eq!(record_id(&record(json!({"id": id.to_string()}))), Some(id));
        assert_eq!(record_id(&record(json!({"id": 7}))), None);
    }

    #[test]
    fn test_to_record_rejects_non_objects() {
        assert!(to_record(Table::DreLines, &"plain string").is_err());
    }
}
