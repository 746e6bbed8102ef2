//! Server settings from the environment.
//!
//! | variable                   | default   |
//! |----------------------------|-----------|
//! | `HOST`                     | `0.0.0.0` |
//! | `PORT`                     | `8080`    |
//! | `INACTIVITY_TIMEOUT_HOURS` | `12`      |
//! | `CLEANUP_INTERVAL_MINUTES` | `30`      |
//!
//! Missing, unparseable or out of range values fall back to the default.

use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments not touched for this long are dropped.
    pub inactivity_timeout: Duration,
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("Ignoring invalid {}={:?}", key, raw);
                    None
                }
            }
        }

        fn scaled(value: u64, unit_secs: u64, key: &str) -> Option<Duration> {
            let secs = value.checked_mul(unit_secs);
            if secs.is_none() {
                log::warn!("Ignoring out of range {}={}", key, value);
            }
            secs.map(Duration::from_secs)
        }

        let defaults = Self::default();
        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            inactivity_timeout: parsed::<u64>(&lookup, "INACTIVITY_TIMEOUT_HOURS")
                .and_then(|h| scaled(h, 3600, "INACTIVITY_TIMEOUT_HOURS"))
                .unwrap_or(defaults.inactivity_timeout),
            cleanup_interval: parsed::<u64>(&lookup, "CLEANUP_INTERVAL_MINUTES")
                .filter(|&m| m > 0)
                .and_then(|m| scaled(m, 60, "CLEANUP_INTERVAL_MINUTES"))
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}
