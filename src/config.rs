//! Server configuration from environment variables.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080), `SESSION_TTL_HOURS` (default 12),
//! `SEED_PLAYERS_CSV` (path to a roster CSV replacing the built-in players),
//! `SESSION_KEY` (cookie signing key, at least 64 bytes; random per process if unset) and
//! `COOKIE_SECURE` (`true`/`1` to only send the session cookie over HTTPS).
//! Unparseable values fall back to the defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Cookie keys shorter than this are rejected by the cookie crate.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Games not touched for this long are dropped.
    pub session_ttl: Duration,
    pub cleanup_interval: Duration,
    pub seed_csv: Option<PathBuf>,
    pub session_key: Option<Vec<u8>>,
    pub cookie_secure: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl_hours() -> u64 {
    12
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_ttl: Duration::from_secs(default_session_ttl_hours() * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
            seed_csv: None,
            session_key: None,
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map instead of the process env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(default_host);
        let port = non_empty("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or_else(default_port);
        let ttl_hours = non_empty("SESSION_TTL_HOURS")
            .and_then(|h| h.trim().parse::<u64>().ok())
            .filter(|&h| h > 0 && h.checked_mul(3600).is_some())
            .unwrap_or_else(default_session_ttl_hours);
        let seed_csv = non_empty("SEED_PLAYERS_CSV").map(PathBuf::from);
        let session_key = match non_empty("SESSION_KEY") {
            Some(key) if key.len() >= MIN_SESSION_KEY_LEN => Some(key.into_bytes()),
            Some(_) => {
                log::warn!(
                    "SESSION_KEY shorter than {} bytes, using a random key",
                    MIN_SESSION_KEY_LEN
                );
                None
            }
            None => None,
        };
        let cookie_secure = non_empty("COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            session_ttl: Duration::from_secs(ttl_hours * 3600),
            seed_csv,
            session_key,
            cookie_secure,
            ..Self::default()
        }
    }
}
