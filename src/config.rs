//! Server configuration.

use std::time::Duration;

use crate::mutator::DEFAULT_UPDATE_INTERVAL;

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default origin allowed by the CORS layer (the demo frontend).
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Runtime configuration for the server and mutation loop.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// The single origin allowed for cross-origin requests.
    pub allowed_origin: String,
    /// Time between mutation cycles.
    pub update_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: DEFAULT_PORT,
            allowed_origin: String::from(DEFAULT_ALLOWED_ORIGIN),
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

impl ServerConfig {
    /// Builds a config from the environment, falling back to defaults
    /// for anything unset or unparseable.
    ///
    /// Recognized variables: `PRICEFEED_HOST`, `PRICEFEED_PORT`,
    /// `PRICEFEED_ALLOWED_ORIGIN`, `PRICEFEED_UPDATE_INTERVAL_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("PRICEFEED_HOST").unwrap_or(defaults.host),
            port: std::env::var("PRICEFEED_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            allowed_origin: std::env::var("PRICEFEED_ALLOWED_ORIGIN")
                .unwrap_or(defaults.allowed_origin),
            update_interval: std::env::var("PRICEFEED_UPDATE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.update_interval),
        }
    }
}
