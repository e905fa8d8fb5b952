//! Statistics collection for mongo-cmp.
//!
//! A [`StatsCollector`] walks one endpoint's databases and collections
//! sequentially and produces an [`EndpointSnapshot`]. [`collect_both`] runs
//! the source and destination collectors concurrently and fails the whole
//! comparison if either side cannot enumerate its inventory.
//!
//! Per-collection failures never abort a run; they are recorded as a
//! [`CollectionStatus`] on the affected collection.

mod collector;
mod config;
mod dual;
mod error;
mod model;
pub mod progress;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use collector::StatsCollector;
pub use config::{CollectorConfig, DatabaseSelector, ALL_DATABASES};
pub use dual::{collect_both, ClusterSnapshots};
pub use error::{CollectError, CompareError, Side};
pub use model::{CollectionStat, CollectionStatus, DatabaseSnapshot, EndpointSnapshot};
pub use progress::{NoProgress, ProgressSink, ProgressTracker};
