//! In-memory endpoint and progress recorder for tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};
use mongo_cmp_endpoint::{EndpointClient, EndpointError, Operation, SYSTEM_SESSIONS};

use crate::progress::{ProgressSink, ProgressTracker};

/// Build a `collStats`-shaped document carrying the four compared sizes.
pub fn stats_doc(size: i64, storage_size: i64, total_index_size: i64, total_size: i64) -> Document {
    doc! {
        "ns": "test.collection",
        "size": size,
        "storageSize": storage_size,
        "totalIndexSize": total_index_size,
        "totalSize": total_size,
        "nindexes": 1,
        "ok": 1.0,
    }
}

#[derive(Debug, Clone)]
struct MemoryCollection {
    name: String,
    stats: Document,
    count: u64,
}

/// Snapshot of how often each primitive was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_databases: usize,
    pub list_collections: usize,
    pub count_documents: usize,
    pub collection_stats: usize,
}

#[derive(Debug, Default)]
struct CallCounters {
    list_databases: AtomicUsize,
    list_collections: AtomicUsize,
    count_documents: AtomicUsize,
    collection_stats: AtomicUsize,
}

/// An [`EndpointClient`] backed by fixed data with failure injection.
///
/// Injected failures surface as [`EndpointError::Timeout`] so they look like
/// an unresponsive server.
#[derive(Debug)]
pub struct MemoryEndpoint {
    name: String,
    databases: Vec<(String, Vec<MemoryCollection>)>,
    latency: Option<Duration>,
    fail_list_databases: bool,
    fail_list_collections: HashSet<String>,
    fail_stats: HashSet<(String, String)>,
    fail_count: HashSet<(String, String)>,
    calls: CallCounters,
}

impl MemoryEndpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            databases: Vec::new(),
            latency: None,
            fail_list_databases: false,
            fail_list_collections: HashSet::new(),
            fail_stats: HashSet::new(),
            fail_count: HashSet::new(),
            calls: CallCounters::default(),
        }
    }

    /// Add an empty database.
    pub fn with_database(mut self, database: &str) -> Self {
        self.database_mut(database);
        self
    }

    /// Add a collection, creating its database on first use.
    pub fn with_collection(
        mut self,
        database: &str,
        collection: &str,
        stats: Document,
        count: u64,
    ) -> Self {
        self.database_mut(database).push(MemoryCollection {
            name: collection.to_string(),
            stats,
            count,
        });
        self
    }

    /// Sleep this long inside every primitive call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn failing_list_databases(mut self) -> Self {
        self.fail_list_databases = true;
        self
    }

    pub fn failing_list_collections(mut self, database: &str) -> Self {
        self.fail_list_collections.insert(database.to_string());
        self
    }

    pub fn failing_stats(mut self, database: &str, collection: &str) -> Self {
        self.fail_stats
            .insert((database.to_string(), collection.to_string()));
        self
    }

    pub fn failing_count(mut self, database: &str, collection: &str) -> Self {
        self.fail_count
            .insert((database.to_string(), collection.to_string()));
        self
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            list_databases: self.calls.list_databases.load(Ordering::SeqCst),
            list_collections: self.calls.list_collections.load(Ordering::SeqCst),
            count_documents: self.calls.count_documents.load(Ordering::SeqCst),
            collection_stats: self.calls.collection_stats.load(Ordering::SeqCst),
        }
    }

    fn database_mut(&mut self, database: &str) -> &mut Vec<MemoryCollection> {
        let index = match self.databases.iter().position(|(name, _)| name == database) {
            Some(index) => index,
            None => {
                self.databases.push((database.to_string(), Vec::new()));
                self.databases.len() - 1
            }
        };
        &mut self.databases[index].1
    }

    fn find(&self, database: &str, collection: &str) -> Option<&MemoryCollection> {
        self.databases
            .iter()
            .find(|(name, _)| name == database)
            .and_then(|(_, collections)| collections.iter().find(|c| c.name == collection))
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn injected(operation: Operation) -> EndpointError {
        EndpointError::Timeout {
            operation,
            timeout: Duration::from_secs(15),
        }
    }
}

#[async_trait]
impl EndpointClient for MemoryEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_database_names(&self) -> Result<Vec<String>, EndpointError> {
        self.calls.list_databases.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.fail_list_databases {
            return Err(Self::injected(Operation::ListDatabases));
        }
        Ok(self.databases.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn list_collection_names(&self, database: &str) -> Result<Vec<String>, EndpointError> {
        self.calls.list_collections.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.fail_list_collections.contains(database) {
            return Err(Self::injected(Operation::ListCollections {
                database: database.to_string(),
            }));
        }
        Ok(self
            .databases
            .iter()
            .find(|(name, _)| name == database)
            .map(|(_, collections)| collections.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default())
    }

    async fn count_documents(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<u64, EndpointError> {
        self.calls.count_documents.fetch_add(1, Ordering::SeqCst);
        if collection == SYSTEM_SESSIONS {
            return Ok(0);
        }
        self.simulate_latency().await;
        let key = (database.to_string(), collection.to_string());
        if self.fail_count.contains(&key) {
            return Err(Self::injected(Operation::CountDocuments {
                database: key.0,
                collection: key.1,
            }));
        }
        Ok(self.find(database, collection).map_or(0, |c| c.count))
    }

    async fn collection_stats(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Document, EndpointError> {
        self.calls.collection_stats.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let key = (database.to_string(), collection.to_string());
        if self.fail_stats.contains(&key) {
            return Err(Self::injected(Operation::CollectionStats {
                database: key.0,
                collection: key.1,
            }));
        }
        self.find(database, collection)
            .map(|c| c.stats.clone())
            .ok_or(EndpointError::NotFound {
                database: key.0,
                collection: key.1,
            })
    }
}

/// State of one recorded tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerRecord {
    pub label: String,
    pub total: u64,
    pub position: u64,
    pub finished: bool,
}

/// A [`ProgressSink`] that remembers every tracker it handed out.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    trackers: Arc<Mutex<Vec<TrackerRecord>>>,
}

impl RecordingProgress {
    pub fn tracker(&self, label: &str) -> Option<TrackerRecord> {
        self.records().into_iter().find(|t| t.label == label)
    }

    pub fn records(&self) -> Vec<TrackerRecord> {
        self.trackers.lock().unwrap().clone()
    }
}

struct RecordingTracker {
    index: usize,
    trackers: Arc<Mutex<Vec<TrackerRecord>>>,
}

impl ProgressSink for RecordingProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressTracker> {
        let mut trackers = self.trackers.lock().unwrap();
        trackers.push(TrackerRecord {
            label: label.to_string(),
            total,
            position: 0,
            finished: false,
        });
        Box::new(RecordingTracker {
            index: trackers.len() - 1,
            trackers: self.trackers.clone(),
        })
    }
}

impl ProgressTracker for RecordingTracker {
    fn increment(&self) {
        self.trackers.lock().unwrap()[self.index].position += 1;
    }

    fn finish(&self) {
        self.trackers.lock().unwrap()[self.index].finished = true;
    }
}
