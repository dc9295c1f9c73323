//! Logging setup.
//!
//! Structured logging is controlled by environment variables:
//!
//! - `PODCAT_DEBUG=true|1|yes` - Enable debug logging
//! - `PODCAT_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `PODCAT_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! ```rust,no_run
//! podcat::logging::init();
//! ```
//!
//! The library crates only emit events through `tracing`; nothing is printed
//! unless a subscriber is installed, either here or by the application.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `PODCAT_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("PODCAT_DEBUG")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Get the configured log level.
///
/// Defaults to "debug" if `PODCAT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    resolve_level(env::var("PODCAT_LOG_LEVEL").ok().as_deref(), is_debug_enabled())
}

/// Get the configured log format. Defaults to "json".
pub fn get_log_format() -> &'static str {
    resolve_format(env::var("PODCAT_LOG_FORMAT").ok().as_deref())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn resolve_level(level: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match level.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn resolve_format(format: Option<&str>) -> &'static str {
    match format.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Initialize logging. Subsequent calls are no-ops.
///
/// Does nothing unless `PODCAT_DEBUG` or `PODCAT_LOG_LEVEL` is set, so an
/// application can install its own subscriber instead.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("PODCAT_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "podcat={},podcat_model={},podcat_mongodb={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: the host application may already own the global subscriber.
            let result = match get_log_format() {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if result.is_ok() {
                tracing::info!(
                    level = level,
                    format = get_log_format(),
                    "Podcat logging initialized"
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("YES"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(Some("TRACE"), false), "trace");
        assert_eq!(resolve_level(Some("bogus"), false), "warn");
        assert_eq!(resolve_level(Some("bogus"), true), "debug");
        assert_eq!(resolve_level(None, false), "warn");
        assert_eq!(resolve_level(None, true), "debug");
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None), "json");
        assert_eq!(resolve_format(Some("Pretty")), "pretty");
        assert_eq!(resolve_format(Some("compact")), "compact");
        assert_eq!(resolve_format(Some("xml")), "json");
    }
}
