//! Protocol client seam.
//!
//! The adapter never speaks the wire protocol itself; it talks to whatever
//! implements [`Client`]. Two SQL request shapes exist: a query request
//! returning row tuples plus column metadata, and an update request returning
//! an affected-row count plus the server-assigned autoincrement ids. Catalog
//! introspection additionally needs raw space selects and a liveness probe.

use async_trait::async_trait;

use super::error::TntResult;
use super::params::ParameterList;
use super::result::Column;
use super::types::TntValue;
use super::wrapper::TntConfig;

/// Response to an SQL query request.
#[derive(Debug, Clone, Default)]
pub struct SqlQueryResponse {
    /// Column metadata, in result order.
    pub columns: Vec<Column>,
    /// Row tuples; each tuple is positionally aligned with `columns`.
    pub rows: Vec<Vec<TntValue>>,
}

/// Response to an SQL update request.
#[derive(Debug, Clone, Default)]
pub struct SqlUpdateResponse {
    /// Number of rows the statement affected, as reported by the server.
    pub row_count: u64,
    /// Server-assigned ids for insert-like statements, in insertion order.
    pub autoincrement_ids: Vec<i64>,
}

/// The underlying binary-protocol client.
///
/// One blocking round trip per call; timeouts and cancellation are inherited
/// unmodified from the implementation. The adapter adds no synchronization of
/// its own, so concurrent requests are serialized only to the extent the
/// transport serializes them.
#[async_trait]
pub trait Client: Send {
    /// Open a connection from a parsed configuration.
    async fn connect(config: &TntConfig) -> TntResult<Self>
    where
        Self: Sized;

    /// Send an SQL query request (SELECT and friends).
    async fn execute_query(
        &mut self,
        sql: &str,
        params: ParameterList,
    ) -> TntResult<SqlQueryResponse>;

    /// Send an SQL update request (INSERT/UPDATE/DELETE/DDL).
    async fn execute_update(
        &mut self,
        sql: &str,
        params: ParameterList,
    ) -> TntResult<SqlUpdateResponse>;

    /// Select tuples from a space through one of its indexes.
    ///
    /// An empty key selects every tuple the index covers.
    async fn select(
        &mut self,
        space_id: u32,
        index_id: u32,
        key: &[TntValue],
    ) -> TntResult<Vec<Vec<TntValue>>>;

    /// Liveness probe.
    async fn ping(&mut self) -> TntResult<()>;
}
