//! Configuration management for the booking engine.
//!
//! Loads configuration from environment variables with sensible defaults.

use boxoffice_core::store::DEFAULT_MAX_DISPATCH_DEPTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Seat layout used when opening theaters
    pub venue: VenueConfig,
    /// Store configuration
    pub runtime: RuntimeConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive (trace, debug, info, warn, error, or per-target)
    pub filter: String,
}

/// Seat layout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Seat rows per theater
    pub rows: usize,
    /// Seat columns per theater
    pub cols: usize,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// How many follow-up hops one request may take
    pub max_dispatch_depth: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            logging: LoggingConfig {
                filter: lookup("RUST_LOG").unwrap_or_else(|| "boxoffice=info".to_string()),
            },
            venue: VenueConfig {
                rows: parse_or(&lookup, "BOXOFFICE_THEATER_ROWS", 5),
                cols: parse_or(&lookup, "BOXOFFICE_THEATER_COLS", 5),
            },
            runtime: RuntimeConfig {
                max_dispatch_depth: parse_or(
                    &lookup,
                    "BOXOFFICE_MAX_DISPATCH_DEPTH",
                    DEFAULT_MAX_DISPATCH_DEPTH,
                ),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.logging.filter, "boxoffice=info");
        assert_eq!(config.venue, VenueConfig { rows: 5, cols: 5 });
        assert_eq!(config.runtime.max_dispatch_depth, DEFAULT_MAX_DISPATCH_DEPTH);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RUST_LOG", "boxoffice=debug"),
            ("BOXOFFICE_THEATER_ROWS", " 8 "),
            ("BOXOFFICE_THEATER_COLS", "wide"),
            ("BOXOFFICE_MAX_DISPATCH_DEPTH", "4"),
        ]);

        let config = Config::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.logging.filter, "boxoffice=debug");
        assert_eq!(config.venue.rows, 8);
        assert_eq!(config.venue.cols, 5);
        assert_eq!(config.runtime.max_dispatch_depth, 4);
    }
}
