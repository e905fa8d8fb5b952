//! Compare command configuration.

mod args;
mod duration;

use mongo_cmp_collector::{CollectorConfig, DatabaseSelector};
use mongo_cmp_endpoint::EndpointConfig;
use thiserror::Error;

pub use args::{CompareArgs, LogFormat, OutputFormat};
pub use duration::parse_duration;

/// Invalid or missing configuration, detected before any network activity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("from is required")]
    MissingSource,

    #[error("to is required")]
    MissingDestination,

    #[error("timeout should be a positive duration")]
    NonPositiveTimeout,

    #[error("database is required")]
    MissingDatabase,
}

/// Validated settings for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    pub source_uri: String,
    pub destination_uri: String,
    pub endpoint: EndpointConfig,
    pub collector: CollectorConfig,
    pub format: OutputFormat,
}

impl CompareArgs {
    /// Check required values and build the run configuration.
    pub fn validate(&self) -> Result<CompareConfig, ConfigError> {
        if self.from.trim().is_empty() {
            return Err(ConfigError::MissingSource);
        }
        if self.to.trim().is_empty() {
            return Err(ConfigError::MissingDestination);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::NonPositiveTimeout);
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingDatabase);
        }

        Ok(CompareConfig {
            source_uri: self.from.clone(),
            destination_uri: self.to.clone(),
            endpoint: EndpointConfig::with_operation_timeout(self.timeout),
            collector: CollectorConfig::new(
                DatabaseSelector::from(self.database.as_str()),
                self.show_details,
            ),
            format: self.format,
        })
    }
}
