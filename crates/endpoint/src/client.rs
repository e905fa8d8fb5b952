//! The endpoint client trait.

use async_trait::async_trait;
use bson::Document;

use crate::error::EndpointError;

/// Administrative collection that is never counted.
///
/// Counting it forces a scan of server-side session state and it never
/// carries user data, so `count_documents` reports zero without a query.
pub const SYSTEM_SESSIONS: &str = "system.sessions";

/// Name of the primary key index used as the count hint.
pub const ID_INDEX: &str = "_id_";

/// Read-only primitives against one database endpoint.
///
/// Implementations must bound every call by their operation timeout and must
/// not retry; retry policy belongs to the caller.
#[async_trait]
pub trait EndpointClient: Send + Sync {
    /// Label of this endpoint in logs (e.g. "source").
    fn name(&self) -> &str;

    /// List all database names on the endpoint.
    async fn list_database_names(&self) -> Result<Vec<String>, EndpointError>;

    /// List collection names of one database.
    async fn list_collection_names(&self, database: &str) -> Result<Vec<String>, EndpointError>;

    /// Count documents of one collection.
    ///
    /// Returns `0` for [`SYSTEM_SESSIONS`] without contacting the server.
    async fn count_documents(&self, database: &str, collection: &str)
        -> Result<u64, EndpointError>;

    /// Fetch the `collStats` document of one collection.
    ///
    /// Fails with [`EndpointError::NotFound`] when the collection does not exist.
    async fn collection_stats(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Document, EndpointError>;
}
