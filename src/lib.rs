//! tntkit - a Tarantool SQL adapter.
//!
//! Maps Tarantool's binary query protocol onto the statement/result-set
//! contract a relational data-access layer expects: statement classification
//! and parameter encoding, execution and result decoding, and schema
//! introspection over the store's system catalogs.
//!
//! The wire protocol itself lives behind the [`tnt::Client`] trait; this crate
//! only implements the mapping between generic statement/parameter/result
//! shapes and the protocol's request/response structures.

pub mod tnt;

pub use tnt::{
    Client, Column, ExecOutcome, FieldInfo, ForeignKeyRef, ParamKey, ParameterList, Params,
    Record, ResultSet, SchemaIntrospector, SharedColumns, SqlQueryResponse, SqlUpdateResponse,
    Statement, StatementKind, TntConfig, TntError, TntResult, TntValue, TntWrapper,
};
