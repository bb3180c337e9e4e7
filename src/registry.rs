//! Connection registry
//!
//! Authoritative set of live connections. Each connection is represented by a
//! [`ConnectionHandle`] wrapping its outbound message queue; the registry maps
//! connection ids to handles behind a lock so session tasks, the hub, and the
//! sensor emitter can touch it concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Opaque connection id (a ULID string, assigned on accept)
pub type ConnectionId = String;

pub type SendResult = Result<(), SendError>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An add() collided with an existing id. Ids are assigned fresh per
    /// accept, so this indicates a bug in the caller, not a user error.
    #[error("connection '{0}' is already registered")]
    DuplicateIdentity(ConnectionId),
}

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The peer's writer task is gone; the connection is dead.
    #[error("peer '{0}' is unreachable")]
    PeerUnreachable(ConnectionId),
}

/// One client's live session, as seen by senders.
///
/// Holds the sending half of the connection's outbound queue. A single writer
/// task per connection drains the queue into the WebSocket sink, so all sends
/// to one peer are serialized and arrive in call order.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    outbound: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, outbound: mpsc::UnboundedSender<String>) -> Self {
        Self { id, outbound }
    }

    /// Queue a text frame for this peer. Fails only if the peer's writer task
    /// has exited, i.e. the connection is already gone.
    pub fn send(&self, text: String) -> SendResult {
        self.outbound
            .send(text)
            .map_err(|_| SendError::PeerUnreachable(self.id.clone()))
    }
}

/// Concurrency-safe mapping from connection id to handle.
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    connections: Arc<RwLock<HashMap<ConnectionId, ConnectionHandle>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly accepted connection.
    pub async fn add(&self, handle: ConnectionHandle) -> Result<(), RegistryError> {
        let mut connections = self.connections.write().await;
        if connections.contains_key(&handle.id) {
            return Err(RegistryError::DuplicateIdentity(handle.id.clone()));
        }
        connections.insert(handle.id.clone(), handle);
        Ok(())
    }

    /// Remove a connection. Idempotent: removing an id that is absent (e.g.
    /// already pruned by the hub after a failed send) is a no-op.
    pub async fn remove(&self, id: &str) {
        self.connections.write().await.remove(id);
    }

    /// An independent snapshot of the currently live connections.
    ///
    /// The returned handles are safe to iterate while the registry keeps
    /// mutating; adds and removes after this call are not reflected.
    pub async fn snapshot(&self) -> Vec<ConnectionHandle> {
        self.connections.read().await.values().cloned().collect()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.connections.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(id: &str) -> (ConnectionHandle, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConnectionHandle::new(id.to_string(), tx), rx)
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let registry = Registry::new();
        let (a, _rx_a) = handle("a");
        let (b, _rx_b) = handle("b");

        registry.add(a).await.unwrap();
        registry.add(b).await.unwrap();
        assert_eq!(registry.len().await, 2);
        assert!(registry.contains("a").await);

        registry.remove("a").await;
        assert_eq!(registry.len().await, 1);
        assert!(!registry.contains("a").await);

        // Removing again is a no-op
        registry.remove("a").await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_add_rejected() {
        let registry = Registry::new();
        let (first, _rx1) = handle("dup");
        let (second, _rx2) = handle("dup");

        registry.add(first).await.unwrap();
        let result = registry.add(second).await;
        assert!(matches!(result, Err(RegistryError::DuplicateIdentity(id)) if id == "dup"));

        // The original registration survives the rejected add
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_independent() {
        let registry = Registry::new();
        let (a, _rx_a) = handle("a");
        registry.add(a).await.unwrap();

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);

        // Mutations after the snapshot are not reflected in it
        let (b, _rx_b) = handle("b");
        registry.add(b).await.unwrap();
        registry.remove("a").await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "a");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_handle_send_fails_when_receiver_dropped() {
        let (handle, rx) = handle("gone");
        drop(rx);

        let result = handle.send("hello".to_string());
        assert!(matches!(result, Err(SendError::PeerUnreachable(id)) if id == "gone"));
    }

    #[tokio::test]
    async fn test_handle_send_preserves_order() {
        let (handle, mut rx) = handle("a");
        handle.send("first".to_string()).unwrap();
        handle.send("second".to_string()).unwrap();

        assert_eq!(rx.recv().await.unwrap(), "first");
        assert_eq!(rx.recv().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_membership_after_connect_disconnect_sequence() {
        let registry = Registry::new();
        let mut receivers = Vec::new();
        for id in ["a", "b", "c", "d"] {
            let (h, rx) = handle(id);
            registry.add(h).await.unwrap();
            receivers.push(rx);
        }
        registry.remove("b").await;
        registry.remove("d").await;

        let mut live: Vec<_> = registry
            .snapshot()
            .await
            .into_iter()
            .map(|h| h.id)
            .collect();
        live.sort();
        assert_eq!(live, vec!["a", "c"]);
    }
}
