//! Endpoint timeouts.

use std::time::Duration;

/// Default bound for every primitive operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Fixed bound for establishing the initial connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeouts threaded into an endpoint at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Deadline applied to each list/count/stats call.
    pub operation_timeout: Duration,
    /// Deadline for parsing the URI and reaching the deployment once.
    pub connect_timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl EndpointConfig {
    /// Config with a custom operation timeout and the default connect timeout.
    pub fn with_operation_timeout(operation_timeout: Duration) -> Self {
        Self {
            operation_timeout,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EndpointConfig::default();
        assert_eq!(config.operation_timeout, Duration::from_secs(15));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_operation_timeout_keeps_connect_timeout() {
        let config = EndpointConfig::with_operation_timeout(Duration::from_secs(30));
        assert_eq!(config.operation_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }
}
