//! Error types for the Tana API client.
//!
//! # Design
//! Every non-success status lands in `Http` with the raw status code and body,
//! since the body is the only diagnostic the service gives. Nothing here is
//! recovered internally; each variant reaches the caller as-is.

use thiserror::Error;

/// Errors returned by `TanaClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than 200 or 201.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be sent or no response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A single-node operation succeeded but the server reported no children.
    #[error("server returned no nodes")]
    EmptyResponse,

    /// Client configuration could not be assembled.
    #[error("invalid configuration: {0}")]
    Config(String),
}
