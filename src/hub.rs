//! Broadcast hub
//!
//! Fan-out delivery over the connection registry. Every delivery starts from
//! a registry snapshot, so concurrent connects and disconnects never corrupt
//! an in-flight broadcast; connections added after the snapshot simply miss
//! that particular message. A failed send means the peer is gone — the hub
//! prunes it from the registry and moves on without surfacing the failure.

use crate::registry::{ConnectionId, Registry};

#[derive(Debug, Clone)]
pub struct Hub {
    registry: Registry,
}

impl Hub {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Deliver `text` to every live connection except `excluded`.
    ///
    /// Returns the number of successful deliveries. Dead peers encountered
    /// along the way are removed from the registry.
    pub async fn broadcast(&self, text: &str, excluded: Option<&ConnectionId>) -> usize {
        let snapshot = self.registry.snapshot().await;
        let mut delivered = 0;

        for connection in &snapshot {
            if excluded.is_some_and(|id| *id == connection.id) {
                continue;
            }
            match connection.send(text.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::debug!(connection = %connection.id, "pruning dead peer: {e}");
                    self.registry.remove(&connection.id).await;
                }
            }
        }

        delivered
    }

    /// Deliver `text` to a single connection. Same pruning rule as broadcast;
    /// a missing or dead peer is not an error for the caller.
    pub async fn send_to(&self, id: &ConnectionId, text: String) {
        let snapshot = self.registry.snapshot().await;
        let Some(connection) = snapshot.iter().find(|c| c.id == *id) else {
            return;
        };
        if let Err(e) = connection.send(text) {
            tracing::debug!(connection = %id, "pruning dead peer: {e}");
            self.registry.remove(id).await;
        }
    }
}
