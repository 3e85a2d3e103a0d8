//! Hub channel error types.

use thiserror::Error;

/// Errors that can occur on the edge-to-hub connection.
#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("edge environment error: {0}")]
    Environment(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("publish error: {0}")]
    Publish(String),

    #[error("subscribe error: {0}")]
    Subscribe(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("shutdown error: {0}")]
    Shutdown(String),
}

/// Convenience alias for hub channel results.
pub type EdgeResult<T> = Result<T, EdgeError>;
