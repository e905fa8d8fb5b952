//! Per-endpoint statistics collector.

use mongo_cmp_endpoint::EndpointClient;

use crate::config::{CollectorConfig, DatabaseSelector};
use crate::error::{CollectError, Side};
use crate::model::{CollectionStat, DatabaseSnapshot, EndpointSnapshot};
use crate::progress::ProgressSink;

/// Walks one endpoint and builds its [`EndpointSnapshot`].
///
/// Databases and collections are processed strictly sequentially in listing
/// order. Failing to list databases or collections is fatal for the
/// snapshot; failing to get one collection's stats or count is recorded on
/// that collection and collection continues.
pub struct StatsCollector<'a, C: EndpointClient + ?Sized> {
    client: &'a C,
    config: &'a CollectorConfig,
    progress: &'a dyn ProgressSink,
    side: Side,
}

impl<'a, C: EndpointClient + ?Sized> StatsCollector<'a, C> {
    pub fn new(
        client: &'a C,
        config: &'a CollectorConfig,
        progress: &'a dyn ProgressSink,
        side: Side,
    ) -> Self {
        Self {
            client,
            config,
            progress,
            side,
        }
    }

    /// Collect the snapshot.
    pub async fn collect(&self) -> Result<EndpointSnapshot, CollectError> {
        let databases = self.target_databases().await?;
        tracing::info!(
            side = %self.side,
            endpoint = self.client.name(),
            databases = databases.len(),
            "collecting stats"
        );

        let mut snapshot = EndpointSnapshot::new();
        for database in databases {
            let collections = self.collect_database(&database).await?;
            snapshot.insert(database, collections);
        }

        Ok(snapshot)
    }

    async fn target_databases(&self) -> Result<Vec<String>, CollectError> {
        match &self.config.databases {
            DatabaseSelector::All => self
                .client
                .list_database_names()
                .await
                .map_err(CollectError::ListDatabases),
            DatabaseSelector::Named(name) => Ok(vec![name.clone()]),
        }
    }

    async fn collect_database(&self, database: &str) -> Result<DatabaseSnapshot, CollectError> {
        let names = self
            .client
            .list_collection_names(database)
            .await
            .map_err(|source| CollectError::ListCollections {
                database: database.to_string(),
                source,
            })?;

        let label = format!("{}: {}", self.side, database);
        let tracker = self.progress.start(&label, names.len() as u64);

        let mut snapshot = DatabaseSnapshot::new();
        for name in names {
            let stat = if self.config.show_details {
                self.collect_collection(database, &name).await
            } else {
                CollectionStat::skipped(name)
            };
            snapshot.insert(stat);
            tracker.increment();
        }
        tracker.finish();

        tracing::debug!(
            side = %self.side,
            database,
            collections = snapshot.len(),
            "database collected"
        );
        Ok(snapshot)
    }

    async fn collect_collection(&self, database: &str, collection: &str) -> CollectionStat {
        let raw_stats = match self.client.collection_stats(database, collection).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(
                    side = %self.side,
                    database,
                    collection,
                    error = %e,
                    "failed to get collection stats"
                );
                return CollectionStat::failed_to_get_stats(collection);
            }
        };

        match self.client.count_documents(database, collection).await {
            Ok(count) => CollectionStat::succeeded(collection, raw_stats, count),
            Err(e) => {
                tracing::error!(
                    side = %self.side,
                    database,
                    collection,
                    error = %e,
                    "failed to count documents"
                );
                CollectionStat::failed_to_count(collection, raw_stats)
            }
        }
    }
}
