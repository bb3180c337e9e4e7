//! Shared application state

use crate::config::RelayConfig;
use crate::hub::Hub;
use crate::registry::Registry;

/// Everything the session loops and the sensor emitter share. Handed to axum
/// as an `Arc<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub registry: Registry,
    pub hub: Hub,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        let registry = Registry::new();
        let hub = Hub::new(registry.clone());
        Self {
            config,
            registry,
            hub,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}
