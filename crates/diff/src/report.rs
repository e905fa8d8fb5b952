//! Unified report types.

use std::fmt;

use mongo_cmp_collector::CollectionStatus;
use serde::{Serialize, Serializer};

use crate::relevant::RelevantStats;

/// What one side of a row shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// Collected statistics (succeeded, or stats fetched but count failed).
    Stats(RelevantStats),
    /// A bare status; no field comparison is meaningful.
    Status(CollectionStatus),
}

impl Representation {
    pub fn status_label(&self) -> Option<&'static str> {
        match self {
            Representation::Stats(_) => None,
            Representation::Status(status) => Some(status.label()),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Stats(stats) => fmt::Display::fmt(stats, f),
            Representation::Status(status) => f.write_str(status.label()),
        }
    }
}

impl Serialize for Representation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Representation::Stats(stats) => stats.serialize(serializer),
            Representation::Status(status) => serializer.serialize_str(status.label()),
        }
    }
}

/// Whether both sides of a row agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Same,
    Different,
    /// At least one side has no comparable statistics.
    NotApplicable,
}

impl Verdict {
    /// Short marker used in the table's "Same" column.
    pub fn symbol(&self) -> &'static str {
        match self {
            Verdict::Same => "+",
            Verdict::Different => "-",
            Verdict::NotApplicable => "N/A",
        }
    }
}

/// One collection compared across both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionRow {
    pub collection: String,
    pub source: Representation,
    pub destination: Representation,
    pub verdict: Verdict,
}

/// All rows of one database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseReport {
    #[serde(rename = "database")]
    pub name: String,
    pub rows: Vec<CollectionRow>,
}

impl DatabaseReport {
    pub fn row(&self, collection: &str) -> Option<&CollectionRow> {
        self.rows.iter().find(|r| r.collection == collection)
    }

    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.collection.as_str())
    }
}

/// Counts of rows by verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub databases: usize,
    pub collections: usize,
    pub same: usize,
    pub different: usize,
    pub not_applicable: usize,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}: {} same, {} different, {} not comparable",
            counted(self.databases, "database"),
            counted(self.collections, "collection"),
            self.same,
            self.different,
            self.not_applicable
        )
    }
}

fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// The merged comparison of two endpoint snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnifiedReport {
    pub databases: Vec<DatabaseReport>,
}

impl UnifiedReport {
    pub fn database(&self, name: &str) -> Option<&DatabaseReport> {
        self.databases.iter().find(|d| d.name == name)
    }

    pub fn database_names(&self) -> impl Iterator<Item = &str> {
        self.databases.iter().map(|d| d.name.as_str())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            databases: self.databases.len(),
            ..ReportSummary::default()
        };
        for row in self.databases.iter().flat_map(|d| d.rows.iter()) {
            summary.collections += 1;
            match row.verdict {
                Verdict::Same => summary.same += 1,
                Verdict::Different => summary.different += 1,
                Verdict::NotApplicable => summary.not_applicable += 1,
            }
        }
        summary
    }

    /// True when no row shows a difference.
    pub fn is_consistent(&self) -> bool {
        self.summary().different == 0
    }
}
