//! Result sets and fetch accessors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::client::{SqlQueryResponse, SqlUpdateResponse};
use super::types::TntValue;

/// Metadata for one result column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub field_type: String,
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            nullable,
        }
    }
}

/// Shared column descriptions - wrapped in Arc to avoid cloning on every fetch.
pub type SharedColumns = Arc<Vec<Column>>;

/// One fetched row as ordered name→value pairs.
///
/// Column order is the authoritative name-to-position mapping, so records
/// preserve it instead of hashing.
pub type Record = Vec<(String, TntValue)>;

/// Rows paired with their column metadata.
///
/// Invariant: row tuples are positionally aligned with `columns`. For update
/// results there are no rows; `row_count` carries the server-reported
/// affected-row count instead.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: SharedColumns,
    rows: Vec<Vec<TntValue>>,
    row_count: u64,
    autoincrement_ids: Vec<i64>,
}

impl ResultSet {
    /// Build from a query response.
    pub fn from_query(response: SqlQueryResponse) -> Self {
        let row_count = response.rows.len() as u64;
        Self {
            columns: Arc::new(response.columns),
            rows: response.rows,
            row_count,
            autoincrement_ids: Vec::new(),
        }
    }

    /// Build from an update response.
    pub fn from_update(response: SqlUpdateResponse) -> Self {
        Self {
            columns: Arc::new(Vec::new()),
            rows: Vec::new(),
            row_count: response.row_count,
            autoincrement_ids: response.autoincrement_ids,
        }
    }

    /// Column metadata, in result order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Raw row tuples.
    pub fn rows(&self) -> &[Vec<TntValue>] {
        &self.rows
    }

    /// Row count: result rows for queries, affected rows for updates.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Server-assigned ids from an insert-like update, in insertion order.
    pub fn autoincrement_ids(&self) -> &[i64] {
        &self.autoincrement_ids
    }

    /// The first autoincrement id, if the server assigned any.
    pub fn first_autoincrement_id(&self) -> Option<i64> {
        self.autoincrement_ids.first().copied()
    }

    /// Zip one row against the column names.
    fn record(&self, row: &[TntValue]) -> Record {
        self.columns
            .iter()
            .zip(row.iter())
            .map(|(col, value)| (col.name.clone(), value.clone()))
            .collect()
    }

    /// All rows as ordered name→value records.
    pub fn fetch_all(&self) -> Vec<Record> {
        self.rows.iter().map(|row| self.record(row)).collect()
    }

    /// The first row as a record, if any rows exist.
    pub fn fetch(&self) -> Option<Record> {
        self.rows.first().map(|row| self.record(row))
    }

    /// The value at `index` in the first row.
    ///
    /// Absent when there are no rows or the index is out of range.
    pub fn fetch_column(&self, index: usize) -> Option<TntValue> {
        self.rows.first().and_then(|row| row.get(index)).cloned()
    }

    /// The `index`-th value of every row.
    ///
    /// Short rows contribute `None` instead of erroring.
    pub fn fetch_all_column(&self, index: usize) -> Vec<Option<TntValue>> {
        self.rows
            .iter()
            .map(|row| row.get(index).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::from_query(SqlQueryResponse {
            columns: vec![
                Column::new("id", "unsigned", false),
                Column::new("val", "string", true),
            ],
            rows: vec![
                vec![TntValue::UInt(1), TntValue::from("x")],
                vec![TntValue::UInt(2), TntValue::from("y")],
            ],
        })
    }

    #[test]
    fn test_fetch_all_zips_names_positionally() {
        let records = sample().fetch_all();
        assert_eq!(
            records,
            vec![
                vec![
                    ("id".to_string(), TntValue::UInt(1)),
                    ("val".to_string(), TntValue::from("x")),
                ],
                vec![
                    ("id".to_string(), TntValue::UInt(2)),
                    ("val".to_string(), TntValue::from("y")),
                ],
            ]
        );
    }

    #[test]
    fn test_fetch_first_row() {
        let first = sample().fetch().unwrap();
        assert_eq!(first[0], ("id".to_string(), TntValue::UInt(1)));

        let empty = ResultSet::from_query(SqlQueryResponse::default());
        assert!(empty.fetch().is_none());
    }

    #[test]
    fn test_fetch_column_bounds() {
        let rs = sample();
        assert_eq!(rs.fetch_column(1), Some(TntValue::from("x")));
        assert_eq!(rs.fetch_column(5), None);

        let empty = ResultSet::from_query(SqlQueryResponse::default());
        assert_eq!(empty.fetch_column(0), None);
    }

    #[test]
    fn test_fetch_all_column_short_rows() {
        let rs = ResultSet::from_query(SqlQueryResponse {
            columns: vec![
                Column::new("a", "string", true),
                Column::new("b", "string", true),
            ],
            rows: vec![
                vec![TntValue::from("a1"), TntValue::from("b1")],
                vec![TntValue::from("a2")],
            ],
        });
        assert_eq!(
            rs.fetch_all_column(1),
            vec![Some(TntValue::from("b1")), None]
        );
    }

    #[test]
    fn test_update_row_count_is_affected_rows() {
        let rs = ResultSet::from_update(SqlUpdateResponse {
            row_count: 3,
            autoincrement_ids: vec![11, 12, 13],
        });
        assert_eq!(rs.row_count(), 3);
        assert!(rs.rows().is_empty());
        assert_eq!(rs.first_autoincrement_id(), Some(11));
    }
}
