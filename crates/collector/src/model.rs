//! Snapshot data model.

use std::collections::HashMap;
use std::fmt;

use bson::Document;

/// Outcome of collecting one collection's statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStatus {
    Succeeded,
    FailedToGetStats,
    FailedToCountDocuments,
    /// Detail collection was disabled by configuration.
    Skipped,
    /// The collection exists only on the other endpoint.
    ///
    /// Never produced by a collector; only the diff engine synthesizes it.
    NotFound,
}

impl CollectionStatus {
    /// Label shown in reports.
    pub fn label(&self) -> &'static str {
        match self {
            CollectionStatus::Succeeded => "succeeded",
            CollectionStatus::FailedToGetStats => "failed to get collection stats",
            CollectionStatus::FailedToCountDocuments => "failed to count documents",
            CollectionStatus::Skipped => "skipped",
            CollectionStatus::NotFound => "not found",
        }
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observed facts about one collection on one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStat {
    pub name: String,
    /// Set only when `status` is [`CollectionStatus::Succeeded`].
    pub document_count: Option<u64>,
    /// The `collStats` document; empty when stats were not fetched.
    pub raw_stats: Document,
    pub status: CollectionStatus,
}

impl CollectionStat {
    pub fn succeeded(name: impl Into<String>, raw_stats: Document, document_count: u64) -> Self {
        Self {
            name: name.into(),
            document_count: Some(document_count),
            raw_stats,
            status: CollectionStatus::Succeeded,
        }
    }

    pub fn failed_to_get_stats(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document_count: None,
            raw_stats: Document::new(),
            status: CollectionStatus::FailedToGetStats,
        }
    }

    pub fn failed_to_count(name: impl Into<String>, raw_stats: Document) -> Self {
        Self {
            name: name.into(),
            document_count: None,
            raw_stats,
            status: CollectionStatus::FailedToCountDocuments,
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document_count: None,
            raw_stats: Document::new(),
            status: CollectionStatus::Skipped,
        }
    }
}

/// Collections of one database on one endpoint, in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseSnapshot {
    collections: Vec<CollectionStat>,
    /// Collection name to position in `collections`.
    index: HashMap<String, usize>,
}

impl DatabaseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collection, replacing any earlier entry with the same name.
    pub fn insert(&mut self, stat: CollectionStat) {
        match self.index.get(&stat.name) {
            Some(&position) => self.collections[position] = stat,
            None => {
                self.index.insert(stat.name.clone(), self.collections.len());
                self.collections.push(stat);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CollectionStat> {
        self.index.get(name).map(|&position| &self.collections[position])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectionStat> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl FromIterator<CollectionStat> for DatabaseSnapshot {
    fn from_iter<I: IntoIterator<Item = CollectionStat>>(iter: I) -> Self {
        let mut snapshot = DatabaseSnapshot::new();
        for stat in iter {
            snapshot.insert(stat);
        }
        snapshot
    }
}

/// Everything observed on one endpoint during one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointSnapshot {
    /// Databases in scope, in listing order.
    pub databases: Vec<String>,
    pub collections: HashMap<String, DatabaseSnapshot>,
}

impl EndpointSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a database and its collections.
    pub fn insert(&mut self, database: impl Into<String>, snapshot: DatabaseSnapshot) {
        let database = database.into();
        if !self.collections.contains_key(&database) {
            self.databases.push(database.clone());
        }
        self.collections.insert(database, snapshot);
    }

    pub fn database(&self, name: &str) -> Option<&DatabaseSnapshot> {
        self.collections.get(name)
    }

    /// Every collection stat across all databases.
    pub fn stats(&self) -> impl Iterator<Item = &CollectionStat> {
        self.databases
            .iter()
            .filter_map(|db| self.collections.get(db))
            .flat_map(DatabaseSnapshot::iter)
    }
}
