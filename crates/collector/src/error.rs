//! Error types for stats collection.

use std::fmt;

use mongo_cmp_endpoint::EndpointError;
use thiserror::Error;

/// Which endpoint of a comparison something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Destination,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Destination => "destination",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal enumeration failures that invalidate one endpoint's snapshot.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("failed to list databases")]
    ListDatabases(#[source] EndpointError),

    #[error("failed to list collections of database '{database}'")]
    ListCollections {
        database: String,
        #[source]
        source: EndpointError,
    },
}

/// Failure of a two-sided comparison run.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("failed to collect stats from the {side} database")]
    Collect {
        side: Side,
        #[source]
        source: CollectError,
    },
}

impl CompareError {
    /// The endpoint whose collection failed.
    pub fn side(&self) -> Side {
        match self {
            CompareError::Collect { side, .. } => *side,
        }
    }
}
