/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * first by the binary), with defaults suited to local development.
 *
 * | Variable      | Default              |
 * |---------------|----------------------|
 * | `SERVER_PORT` | `3000`               |
 * | `DATA_FILE`   | `public/data.json`   |
 * | `TOPICS_FILE` | `public/topics.json` |
 * | `PUBLIC_DIR`  | `public`             |
 *
 * Invalid values are logged and replaced by the default instead of aborting
 * startup.
 */

use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (all interfaces)
    pub port: u16,
    /// Voting document
    pub data_file: PathBuf,
    /// Topics list document
    pub topics_file: PathBuf,
    /// Directory served at the root for any path no route claims
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: PathBuf::from("public/data.json"),
            topics_file: PathBuf::from("public/topics.json"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), defaults.port),
            data_file: lookup("DATA_FILE").map(PathBuf::from).unwrap_or(defaults.data_file),
            topics_file: lookup("TOPICS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.topics_file),
            public_dir: lookup("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir),
        }
    }

    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {key} value {raw:?}: {e}, using default {default}");
            default
        }),
        None => {
            tracing::info!("{key} not set, using default: {default}");
            default
        }
    }
}
