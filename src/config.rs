//! Registry configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::path::PathBuf;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per line.
    Json,
}

/// Top-level registry configuration.
///
/// Loaded once at startup via [`RegistryConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// JSON file of applications to register at startup.
    pub seed_file: Option<PathBuf>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            event_bus_capacity: 1024,
            seed_file: None,
            log_format: LogFormat::Plain,
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file,
    /// then falls back to [`RegistryConfig::default`] for anything unset
    /// or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let event_bus_capacity = lookup("EVENT_BUS_CAPACITY")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.event_bus_capacity);

        let seed_file = lookup("REGISTRY_SEED_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => defaults.log_format,
        };

        Self {
            event_bus_capacity,
            seed_file,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = RegistryConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.event_bus_capacity, 1024);
        assert!(config.seed_file.is_none());
        assert_eq!(config.log_format, LogFormat::Plain);
    }

    #[test]
    fn reads_all_keys() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            ("EVENT_BUS_CAPACITY", "32"),
            ("REGISTRY_SEED_FILE", "/etc/registry/seed.json"),
            ("LOG_FORMAT", "json"),
        ]));
        assert_eq!(config.event_bus_capacity, 32);
        assert_eq!(
            config.seed_file,
            Some(PathBuf::from("/etc/registry/seed.json"))
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unparsable_capacity_falls_back() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            ("EVENT_BUS_CAPACITY", "lots"),
            ("REGISTRY_SEED_FILE", "  "),
        ]));
        assert_eq!(config.event_bus_capacity, 1024);
        assert!(config.seed_file.is_none());
    }
}
