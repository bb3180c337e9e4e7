//! Runtime configuration loaded from environment variables

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// TCP port to listen on
    pub port: u16,
    /// Prefix marking an inbound message as a device command
    pub command_prefix: String,
    /// How often the background emitter broadcasts a sensor reading
    pub sensor_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            command_prefix: "/device".to_string(),
            sensor_interval: Duration::from_secs(10),
        }
    }
}

impl RelayConfig {
    /// Load config from environment variables, falling back to defaults.
    /// CHAT_PORT, CHAT_COMMAND_PREFIX, CHAT_SENSOR_INTERVAL_SECS
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("CHAT_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let command_prefix = std::env::var("CHAT_COMMAND_PREFIX")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.command_prefix);

        let sensor_interval = std::env::var("CHAT_SENSOR_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.sensor_interval);

        Self {
            port,
            command_prefix,
            sensor_interval,
        }
    }
}
