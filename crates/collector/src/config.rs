//! Collector configuration.

use std::fmt;

/// Database selector value meaning "every database on the endpoint".
pub const ALL_DATABASES: &str = "__all__";

/// Which databases a collector walks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseSelector {
    /// Every database returned by `listDatabases`.
    #[default]
    All,
    /// Exactly one database, whether or not it exists.
    Named(String),
}

impl From<&str> for DatabaseSelector {
    fn from(value: &str) -> Self {
        if value == ALL_DATABASES {
            DatabaseSelector::All
        } else {
            DatabaseSelector::Named(value.to_string())
        }
    }
}

impl fmt::Display for DatabaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseSelector::All => f.write_str(ALL_DATABASES),
            DatabaseSelector::Named(name) => f.write_str(name),
        }
    }
}

/// Read-only settings shared by both collectors of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectorConfig {
    pub databases: DatabaseSelector,
    /// When false, no stats or count calls are made and every collection
    /// is reported as skipped.
    pub show_details: bool,
}

impl CollectorConfig {
    pub fn new(databases: DatabaseSelector, show_details: bool) -> Self {
        Self {
            databases,
            show_details,
        }
    }
}
