//! Error types for endpoint operations.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The primitive an endpoint error originated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Connect,
    ListDatabases,
    ListCollections {
        database: String,
    },
    CountDocuments {
        database: String,
        collection: String,
    },
    CollectionStats {
        database: String,
        collection: String,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Connect => write!(f, "connect"),
            Operation::ListDatabases => write!(f, "list databases"),
            Operation::ListCollections { database } => {
                write!(f, "list collections of '{database}'")
            }
            Operation::CountDocuments {
                database,
                collection,
            } => write!(f, "count documents in '{database}.{collection}'"),
            Operation::CollectionStats {
                database,
                collection,
            } => write!(f, "collStats on '{database}.{collection}'"),
        }
    }
}

/// Errors returned by an [`EndpointClient`](crate::EndpointClient).
#[derive(Error, Debug)]
pub enum EndpointError {
    /// The connection string could not be parsed.
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(#[source] mongodb::error::Error),

    /// Transport, authentication or server failure.
    #[error("{operation} failed: {source}")]
    Connectivity {
        operation: Operation,
        #[source]
        source: mongodb::error::Error,
    },

    /// The operation did not finish within its deadline.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: Operation,
        timeout: Duration,
    },

    /// `collStats` found no such collection.
    #[error("collection '{database}.{collection}' not found")]
    NotFound {
        database: String,
        collection: String,
    },
}

impl EndpointError {
    /// Whether this error means the collection does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EndpointError::NotFound { .. })
    }

    /// The operation that failed, if known.
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            EndpointError::Connectivity { operation, .. }
            | EndpointError::Timeout { operation, .. } => Some(operation),
            EndpointError::InvalidConnectionString(_) => Some(&Operation::Connect),
            EndpointError::NotFound { .. } => None,
        }
    }
}
