//! Tracing subscriber setup.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Map a `--log-level` value to a filter; `None` for unknown values.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        _ => None,
    }
}

/// Level to use for a `--log-level` value, falling back to info.
pub fn level_or_default(level: &str) -> LevelFilter {
    parse_level(level).unwrap_or(LevelFilter::INFO)
}

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_or_default(level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    if parse_level(level).is_none() {
        tracing::warn!(level, "invalid log level, using info");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("error"), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(level_or_default("verbose"), LevelFilter::INFO);
        assert_eq!(level_or_default(""), LevelFilter::INFO);
    }
}
