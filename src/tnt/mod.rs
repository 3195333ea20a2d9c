//! Tarantool SQL driver adapter.
//!
//! This module adapts Tarantool's request/response shapes to the uniform
//! statement contract other backends implement:
//! - `types`: the MessagePack-shaped dynamic value model
//! - `params`: positional/named parameter classification and encoding
//! - `client`: the protocol seam (trait over the underlying binary client)
//! - `result`: row/column result sets and fetch accessors
//! - `statement`: statement classification and execution
//! - `schema`: system-catalog introspection (spaces, indexes, foreign keys)
//! - `wrapper`: the top-level connection facade

pub mod client;
pub mod error;
pub mod params;
pub mod result;
pub mod schema;
pub mod statement;
pub mod types;
pub mod wrapper;

#[cfg(test)]
mod tests;

// Public API re-exports for library consumers
pub use client::{Client, SqlQueryResponse, SqlUpdateResponse};
pub use error::{TntError, TntResult};
pub use params::{ParamKey, ParameterList, Params};
pub use result::{Column, Record, ResultSet, SharedColumns};
pub use schema::{FieldInfo, ForeignKeyRef, SchemaIntrospector};
pub use statement::{ExecOutcome, Statement, StatementKind};
pub use types::TntValue;
pub use wrapper::{TntConfig, TntWrapper};
