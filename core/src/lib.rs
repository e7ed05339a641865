//! Synchronous client for the Tana add-node endpoint.
//!
//! # Overview
//! Builds JSON payloads for nodes, tags and fields, POSTs them with a bearer
//! token, and parses the created nodes out of the `children` array.
//!
//! # Design
//! - `TanaClient` holds only an immutable `ClientConfig` and a `Transport`.
//! - Each operation is split into `build_*` (produces a `Payload`) and
//!   `parse_children` (consumes an `HttpResponse`), so the I/O boundary is
//!   explicit and `Transport` is the single seam to the network.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod payload;
pub mod transport;
pub mod types;

pub use client::TanaClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use payload::Payload;
pub use transport::{Transport, UreqTransport};
pub use types::{
    CreatedNode, Field, PlainNode, SuperTag, ATTR_DEF_TEMPLATE_ID, CORE_TEMPLATE_ID,
    SCHEMA_NODE_ID,
};
