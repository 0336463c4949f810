//! Server configuration from environment variables.
//!
//! HOST, PORT, INACTIVITY_HOURS, COURTS (comma separated), SLOT_MINUTES.
//! Missing or unparseable values fall back to defaults.

use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pools not accessed for this long are dropped.
    pub inactivity_timeout: Duration,
    /// Venue labels used by bulk scheduling when a request names none.
    pub venues: Vec<String>,
    pub slot_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            venues: vec!["Court 1".to_string(), "Court 2".to_string()],
            slot_minutes: 30,
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
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let inactivity_timeout = lookup("INACTIVITY_HOURS")
            .and_then(|h| h.trim().parse::<u64>().ok())
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
            .unwrap_or(defaults.inactivity_timeout);
        let venues = lookup("COURTS")
            .map(|c| {
                c.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.venues);
        let slot_minutes = lookup("SLOT_MINUTES")
            .and_then(|m| m.trim().parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(defaults.slot_minutes);
        Self {
            host,
            port,
            inactivity_timeout,
            venues,
            slot_minutes,
        }
    }
}
