//! Tracing setup for the CLI and for extractors that want their own logger.

use std::sync::Once;
use tracing::{Dispatch, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install the process-wide subscriber for CLI diagnostics. Only the first call wins.
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init(level: Level) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("packbox={}", level))
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init();
    });
}

/// A standalone stderr logger to hand to an [`Extractor`](crate::Extractor).
pub fn dispatch(level: Level) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level(" WARN "), Some(Level::WARN));
        assert_eq!(parse_level("loud"), None);

        for level in VALID_LEVELS {
            assert!(parse_level(level).is_some(), "Should parse: {}", level);
        }
    }

    #[test]
    fn test_dispatch_enables_requested_level() {
        let dispatch = dispatch(Level::INFO);
        tracing::dispatcher::with_default(&dispatch, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));
        });
    }
}
