//! SQL statements and execution.

use super::client::Client;
use super::error::TntResult;
use super::params::{ParamKey, Params};
use super::result::{Record, ResultSet};
use super::types::TntValue;

/// Statement kind, fixed at construction from the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Update,
}

impl StatementKind {
    /// Classify by case-insensitive prefix match on the trimmed text.
    ///
    /// Anything that does not start with `select` is an update.
    pub fn classify(sql: &str) -> Self {
        let trimmed = sql.trim();
        let is_select = trimmed
            .get(..6)
            .map(|prefix| prefix.eq_ignore_ascii_case("select"))
            .unwrap_or(false);
        if is_select {
            StatementKind::Select
        } else {
            StatementKind::Update
        }
    }
}

/// Outcome of one `execute` call.
///
/// The insert id belongs to the execution that produced it rather than to
/// shared connection state, so concurrent statements on one connection never
/// race over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Affected rows for updates, returned rows for selects.
    pub rows_affected: u64,
    /// First server-assigned autoincrement id of this execution, if any.
    pub last_insert_id: Option<i64>,
}

/// A statement bound to a live client.
///
/// Re-execution is always legal and replaces the previous result wholesale.
/// The statement borrows the client mutably, so use of one statement is
/// serialized by construction; callers wanting interleaved statements must
/// create them one at a time.
pub struct Statement<'c, C: Client> {
    client: &'c mut C,
    sql: String,
    kind: StatementKind,
    params: Params,
    last_result: Option<ResultSet>,
}

impl<'c, C: Client> Statement<'c, C> {
    /// Create a statement for the given SQL text.
    pub fn new(client: &'c mut C, sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let kind = StatementKind::classify(&sql);
        Self {
            client,
            sql,
            kind,
            params: Params::new(),
            last_result: None,
        }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The statement kind.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The parameters bound so far.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Bind one value, overwriting any previous binding for the same key.
    ///
    /// Works for positional index keys and named keys alike.
    pub fn bind_value<K, V>(&mut self, key: K, value: V)
    where
        K: Into<ParamKey>,
        V: Into<TntValue>,
    {
        self.params.bind(key, value);
    }

    /// Run a query request and capture the result set.
    ///
    /// `params` defaults to the statement's own bound parameters. Select-kind
    /// statements always route through this path.
    pub async fn query(&mut self, params: Option<&Params>) -> TntResult<&ResultSet> {
        let encoded = params.unwrap_or(&self.params).encode();
        let response = self.client.execute_query(&self.sql, encoded).await?;
        Ok(self.last_result.insert(ResultSet::from_query(response)))
    }

    /// Execute the statement.
    ///
    /// Select-kind statements delegate to the query path and report the row
    /// count. Update-kind statements send an update request; the reported
    /// insert id is the first autoincrement id of this execution's response.
    pub async fn execute(&mut self, params: Option<&Params>) -> TntResult<ExecOutcome> {
        if self.kind == StatementKind::Select {
            let rows_affected = self.query(params).await?.row_count();
            return Ok(ExecOutcome {
                rows_affected,
                last_insert_id: None,
            });
        }

        let encoded = params.unwrap_or(&self.params).encode();
        let response = self.client.execute_update(&self.sql, encoded).await?;
        let result = ResultSet::from_update(response);
        let outcome = ExecOutcome {
            rows_affected: result.row_count(),
            last_insert_id: result.first_autoincrement_id(),
        };
        self.last_result = Some(result);
        Ok(outcome)
    }

    /// Execute using the internally bound parameters.
    pub async fn exec_prepared(&mut self) -> TntResult<ExecOutcome> {
        self.execute(None).await
    }

    /// The most recent result, if the statement has been executed.
    pub fn last_result(&self) -> Option<&ResultSet> {
        self.last_result.as_ref()
    }

    /// All rows of the last result as records; empty before any execution.
    pub fn fetch_all(&self) -> Vec<Record> {
        self.last_result
            .as_ref()
            .map(ResultSet::fetch_all)
            .unwrap_or_default()
    }

    /// First row of the last result.
    pub fn fetch(&self) -> Option<Record> {
        self.last_result.as_ref().and_then(ResultSet::fetch)
    }

    /// Value at `index` in the first row of the last result.
    pub fn fetch_column(&self, index: usize) -> Option<TntValue> {
        self.last_result
            .as_ref()
            .and_then(|rs| rs.fetch_column(index))
    }

    /// The `index`-th value of every row of the last result.
    pub fn fetch_all_column(&self, index: usize) -> Vec<Option<TntValue>> {
        self.last_result
            .as_ref()
            .map(|rs| rs.fetch_all_column(index))
            .unwrap_or_default()
    }

    /// Row count of the last result; zero before any execution.
    pub fn row_count(&self) -> u64 {
        self.last_result
            .as_ref()
            .map(ResultSet::row_count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_prefix_only() {
        assert_eq!(StatementKind::classify("SELECT 1"), StatementKind::Select);
        assert_eq!(
            StatementKind::classify("  select * from t"),
            StatementKind::Select
        );
        assert_eq!(
            StatementKind::classify("\tSeLeCt id from t"),
            StatementKind::Select
        );
        assert_eq!(
            StatementKind::classify("INSERT INTO t VALUES (1)"),
            StatementKind::Update
        );
        assert_eq!(
            StatementKind::classify("UPDATE t SET a = 1"),
            StatementKind::Update
        );
        assert_eq!(StatementKind::classify("sel"), StatementKind::Update);
        assert_eq!(StatementKind::classify(""), StatementKind::Update);
    }
}
