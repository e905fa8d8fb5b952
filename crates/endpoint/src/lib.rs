//! Endpoint client for mongo-cmp.
//!
//! An endpoint is one MongoDB deployment under comparison. This crate exposes
//! the four read-only primitives the stats collector needs, each bounded by
//! its own operation timeout:
//!
//! - `list_database_names`
//! - `list_collection_names`
//! - `count_documents` (index-backed, `system.sessions` short-circuits to zero)
//! - `collection_stats` (`collStats` command)
//!
//! The `EndpointClient` trait is the seam used by the collector; `MongoEndpoint`
//! is the driver-backed implementation.

mod client;
mod config;
mod error;
mod mongo;

pub use client::{EndpointClient, ID_INDEX, SYSTEM_SESSIONS};
pub use config::{EndpointConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_OPERATION_TIMEOUT};
pub use error::{EndpointError, Operation};
pub use mongo::MongoEndpoint;
