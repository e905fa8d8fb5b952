//! Diff engine for mongo-cmp.
//!
//! [`diff`] merges a source and a destination [`EndpointSnapshot`] into a
//! [`UnifiedReport`]: one table per database in either snapshot, one row per
//! collection on either side, with both sides' relevant statistics shown
//! next to each other. The merge is pure and cannot fail; a collection that
//! exists on only one side is reported as `not found` on the other.
//!
//! [`EndpointSnapshot`]: mongo_cmp_collector::EndpointSnapshot

mod merge;
mod relevant;
pub mod render;
mod report;

pub use merge::diff;
pub use relevant::{DocumentCount, RelevantStats};
pub use render::{JsonSink, ReportSink, TableSink};
pub use report::{
    CollectionRow, DatabaseReport, ReportSummary, Representation, UnifiedReport, Verdict,
};
