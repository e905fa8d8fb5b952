//! Extraction of the compared statistics subset.

use std::fmt;

use bson::{Bson, Document};
use mongo_cmp_collector::CollectionStat;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Label used in place of a document count that could not be obtained.
pub const FAILED_TO_COUNT: &str = "failed to count";

/// Document count of a collection, or the fact that counting failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentCount {
    Counted(u64),
    FailedToCount,
}

impl Serialize for DocumentCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocumentCount::Counted(n) => serializer.serialize_u64(*n),
            DocumentCount::FailedToCount => serializer.serialize_str(FAILED_TO_COUNT),
        }
    }
}

/// The four size fields plus document count of one collection.
///
/// Missing fields are `null`. Numbers are normalized so the same size
/// reported as int32, int64 or an integral double compares equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantStats {
    pub collection_size: Value,
    pub storage_size: Value,
    pub total_index_size: Value,
    pub total_size: Value,
    pub document_number: DocumentCount,
}

impl RelevantStats {
    /// Extract from a collected stat. The count is taken as failed when
    /// the stat carries none.
    pub fn extract(stat: &CollectionStat) -> Self {
        Self::from_raw(
            &stat.raw_stats,
            stat.document_count
                .map_or(DocumentCount::FailedToCount, DocumentCount::Counted),
        )
    }

    pub fn from_raw(raw_stats: &Document, document_number: DocumentCount) -> Self {
        Self {
            collection_size: field(raw_stats, "size"),
            storage_size: field(raw_stats, "storageSize"),
            total_index_size: field(raw_stats, "totalIndexSize"),
            total_size: field(raw_stats, "totalSize"),
            document_number,
        }
    }
}

impl fmt::Display for RelevantStats {
    /// Pretty-printed JSON, one field per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn field(stats: &Document, key: &str) -> Value {
    match stats.get(key) {
        None | Some(Bson::Null) => Value::Null,
        Some(Bson::Int32(n)) => Value::from(i64::from(*n)),
        Some(Bson::Int64(n)) => Value::from(*n),
        Some(Bson::Double(d)) if d.fract() == 0.0 && d.abs() < i64::MAX as f64 => {
            Value::from(*d as i64)
        }
        Some(Bson::Double(d)) => Value::from(*d),
        Some(other) => other.clone().into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use mongo_cmp_collector::testing::stats_doc;

    #[test]
    fn test_extracts_size_fields() {
        let stat = CollectionStat::succeeded("users", stats_doc(100, 4096, 512, 4608), 10);
        let stats = RelevantStats::extract(&stat);

        assert_eq!(stats.collection_size, Value::from(100));
        assert_eq!(stats.storage_size, Value::from(4096));
        assert_eq!(stats.total_index_size, Value::from(512));
        assert_eq!(stats.total_size, Value::from(4608));
        assert_eq!(stats.document_number, DocumentCount::Counted(10));
    }

    #[test]
    fn test_failed_count_is_labelled() {
        let stat = CollectionStat::failed_to_count("users", stats_doc(1, 2, 3, 5));
        let stats = RelevantStats::extract(&stat);

        assert_eq!(stats.document_number, DocumentCount::FailedToCount);
        assert_eq!(
            serde_json::to_value(&stats).unwrap()["document_number"],
            Value::from("failed to count")
        );
    }

    #[test]
    fn test_numeric_representations_compare_equal() {
        let as_int32 = doc! { "size": 10_i32, "storageSize": 20_i32 };
        let as_double = doc! { "size": 10.0, "storageSize": 20_i64 };

        assert_eq!(
            RelevantStats::from_raw(&as_int32, DocumentCount::Counted(1)),
            RelevantStats::from_raw(&as_double, DocumentCount::Counted(1))
        );
    }

    #[test]
    fn test_missing_fields_are_null() {
        let stats = RelevantStats::from_raw(&doc! {}, DocumentCount::Counted(0));
        assert_eq!(stats.total_size, Value::Null);
        assert_eq!(stats.collection_size, Value::Null);
    }

    #[test]
    fn test_display_matches_pretty_json() {
        let stats = RelevantStats::from_raw(&stats_doc(1, 2, 3, 5), DocumentCount::Counted(4));
        let expected = serde_json::to_string_pretty(&stats).unwrap();

        assert_eq!(stats.to_string(), expected);
    }

    #[test]
    fn test_display_indents_nested_values() {
        let raw = doc! { "size": { "shard0": 10_i64, "shard1": 20_i64 } };
        let stats = RelevantStats::from_raw(&raw, DocumentCount::FailedToCount);
        let rendered = stats.to_string();

        assert!(rendered.contains("\"collection_size\": {\n    \"shard0\": 10,\n    \"shard1\": 20\n  },"));
        assert!(rendered.contains("\"document_number\": \"failed to count\""));
    }
}
