//! Driver-backed endpoint client.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, Hint};
use mongodb::Client;

use crate::client::{EndpointClient, ID_INDEX, SYSTEM_SESSIONS};
use crate::config::EndpointConfig;
use crate::error::{EndpointError, Operation};

/// Server error code for a missing namespace.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// A MongoDB deployment reachable through one connection string.
#[derive(Clone)]
pub struct MongoEndpoint {
    name: String,
    client: Client,
    config: EndpointConfig,
}

impl MongoEndpoint {
    /// Connect to a deployment and verify it answers a `ping`.
    ///
    /// URI parsing (which may involve SRV lookups) and the ping are both
    /// bounded by `config.connect_timeout`, independently of the operation
    /// timeout used afterwards.
    pub async fn connect(
        name: impl Into<String>,
        uri: &str,
        config: EndpointConfig,
    ) -> Result<Self, EndpointError> {
        let name = name.into();
        tracing::debug!(endpoint = %name, "parsing connection options");

        let connect_timeout = config.connect_timeout;
        let mut options = match tokio::time::timeout(connect_timeout, ClientOptions::parse(uri))
            .await
        {
            Ok(Ok(options)) => options,
            Ok(Err(e)) => return Err(EndpointError::InvalidConnectionString(e)),
            Err(_) => {
                return Err(EndpointError::Timeout {
                    operation: Operation::Connect,
                    timeout: connect_timeout,
                })
            }
        };
        apply_client_options(&mut options, connect_timeout);

        let client = Client::with_options(options).map_err(|source| {
            EndpointError::Connectivity {
                operation: Operation::Connect,
                source,
            }
        })?;

        let admin = client.database("admin");
        let ping = admin.run_command(doc! { "ping": 1 });
        match tokio::time::timeout(connect_timeout, ping).await {
            Ok(Ok(_)) => {}
            Ok(Err(source)) => {
                return Err(EndpointError::Connectivity {
                    operation: Operation::Connect,
                    source,
                })
            }
            Err(_) => {
                return Err(EndpointError::Timeout {
                    operation: Operation::Connect,
                    timeout: connect_timeout,
                })
            }
        }

        tracing::info!(endpoint = %name, "connected");
        Ok(Self {
            name,
            client,
            config,
        })
    }

    /// Wrap an already constructed driver client without contacting it.
    pub fn from_client(name: impl Into<String>, client: Client, config: EndpointConfig) -> Self {
        Self {
            name: name.into(),
            client,
            config,
        }
    }

    /// Run one driver action under the operation timeout.
    async fn bounded<T, F>(&self, operation: Operation, action: F) -> Result<T, EndpointError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        let timeout = self.config.operation_timeout;
        match tokio::time::timeout(timeout, action).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(EndpointError::Connectivity { operation, source }),
            Err(_) => Err(EndpointError::Timeout { operation, timeout }),
        }
    }
}

#[async_trait]
impl EndpointClient for MongoEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_database_names(&self) -> Result<Vec<String>, EndpointError> {
        tracing::debug!(endpoint = %self.name, "listing databases");
        self.bounded(Operation::ListDatabases, self.client.list_database_names())
            .await
    }

    async fn list_collection_names(&self, database: &str) -> Result<Vec<String>, EndpointError> {
        tracing::debug!(endpoint = %self.name, database, "listing collections");
        let db = self.client.database(database);
        self.bounded(
            Operation::ListCollections {
                database: database.to_string(),
            },
            db.list_collection_names(),
        )
        .await
    }

    async fn count_documents(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<u64, EndpointError> {
        if collection == SYSTEM_SESSIONS {
            return Ok(0);
        }

        tracing::debug!(endpoint = %self.name, database, collection, "counting documents");
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);
        // Hinting the _id index keeps the count off a collection scan.
        let count = coll
            .count_documents(doc! {})
            .hint(Hint::Name(ID_INDEX.to_string()));
        self.bounded(
            Operation::CountDocuments {
                database: database.to_string(),
                collection: collection.to_string(),
            },
            count,
        )
        .await
    }

    async fn collection_stats(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Document, EndpointError> {
        tracing::debug!(endpoint = %self.name, database, collection, "getting collection stats");
        let db = self.client.database(database);
        let result = self
            .bounded(
                Operation::CollectionStats {
                    database: database.to_string(),
                    collection: collection.to_string(),
                },
                db.run_command(doc! { "collStats": collection }),
            )
            .await;

        match result {
            Err(EndpointError::Connectivity { source, .. }) if is_namespace_not_found(&source) => {
                Err(EndpointError::NotFound {
                    database: database.to_string(),
                    collection: collection.to_string(),
                })
            }
            other => other,
        }
    }
}

/// Timeouts and identification for every client; failed reads are not retried.
fn apply_client_options(options: &mut ClientOptions, connect_timeout: Duration) {
    options.connect_timeout = Some(connect_timeout);
    options.server_selection_timeout = Some(connect_timeout);
    options.retry_reads = Some(false);
    options.app_name = Some("mongo-cmp".to_string());
}

fn is_namespace_not_found(err: &mongodb::error::Error) -> bool {
    matches!(*err.kind, ErrorKind::Command(ref cmd) if cmd.code == NAMESPACE_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_options_disable_read_retries() {
        let mut options = ClientOptions::parse("mongodb://127.0.0.1:27017/?retryReads=true")
            .await
            .unwrap();
        apply_client_options(&mut options, Duration::from_secs(3));

        assert_eq!(options.retry_reads, Some(false));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(3)));
        assert_eq!(options.app_name.as_deref(), Some("mongo-cmp"));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let result = MongoEndpoint::connect(
            "source",
            "not-a-mongodb-uri",
            EndpointConfig::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(EndpointError::InvalidConnectionString(_))
        ));
    }

    #[tokio::test]
    async fn test_system_sessions_is_never_counted() {
        // Nothing listens on port 1; the driver only dials lazily.
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100")
            .await
            .unwrap();
        let endpoint = MongoEndpoint::from_client("source", client, EndpointConfig::default());

        let count = endpoint
            .count_documents("config", SYSTEM_SESSIONS)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_operation_against_unreachable_host_fails() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100")
            .await
            .unwrap();
        let endpoint = MongoEndpoint::from_client(
            "destination",
            client,
            EndpointConfig::with_operation_timeout(Duration::from_secs(5)),
        );

        let err = endpoint.list_database_names().await.unwrap_err();
        assert_eq!(err.operation(), Some(&Operation::ListDatabases));
    }

    #[tokio::test]
    async fn test_connect_unreachable_host_fails_within_connect_timeout() {
        let config = EndpointConfig {
            operation_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_millis(200),
        };
        let started = std::time::Instant::now();
        let result = MongoEndpoint::connect("source", "mongodb://127.0.0.1:1", config).await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
