//! mongo-cmp
//!
//! Compares two MongoDB deployments (a source and a destination) and reports,
//! per database and per collection, whether their collection inventory,
//! document counts and storage statistics match. Intended for verifying a
//! migration or replication; it only reads.
//!
//! # Crates
//!
//! - `mongo_cmp_endpoint` - timeout-bounded MongoDB primitives
//! - `mongo_cmp_collector` - per-endpoint snapshots and concurrent collection
//! - `mongo_cmp_diff` - snapshot merge and report rendering
//!
//! # CLI Usage
//!
//! ```bash
//! # Compare collection inventory of every database
//! mongo-cmp compare --from mongodb://localhost:27017 --to mongodb://replica:27017
//!
//! # Compare sizes and document counts of one database, 30s per operation
//! mongo-cmp compare -f mongodb://a:27017 -t mongodb://b:27017 -d shop -s --timeout 30s
//! ```

pub mod config;
pub mod logging;
pub mod progress;

mod compare;

pub use compare::{compare_endpoints, run_compare};
pub use config::{CompareArgs, CompareConfig, ConfigError, LogFormat, OutputFormat};
pub use progress::TerminalProgress;
