//! Error types for the Tarantool adapter.

use thiserror::Error;

/// Result type for Tarantool operations.
pub type TntResult<T> = Result<T, TntError>;

/// Errors that can occur during Tarantool operations.
///
/// Transport and server failures propagate unmodified through this layer:
/// there is no retry and no local recovery. The only locally produced
/// conditions are `UnknownSpace` (schema introspection) and `Config`
/// (connection-URL assembly).
#[derive(Error, Debug)]
pub enum TntError {
    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol error (unexpected response shape, invalid format, etc.).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Server returned an error for a request.
    #[error("Server error {code}: {message}")]
    Server { code: u32, message: String },

    /// A schema name could not be resolved to a space id.
    #[error("unknown space: {0}")]
    UnknownSpace(String),

    /// Invalid connection configuration or URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog tuple or value had an unexpected type.
    #[error("Type error: {0}")]
    Type(String),

    /// Connection is closed or in an invalid state.
    #[error("Connection is closed")]
    ConnectionClosed,
}
