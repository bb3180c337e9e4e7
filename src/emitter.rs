//! Periodic sensor emitter
//!
//! Background task that broadcasts a simulated sensor reading to all
//! connected clients on a fixed interval. In a real deployment this is where
//! device hardware or an upstream feed would plug in.

use crate::protocol::{render, Origin};
use crate::state::AppState;
use rand::Rng;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the emitter task. The returned handle is owned by the process
/// lifecycle: abort it on shutdown so the timer does not outlive the server.
pub fn spawn_sensor_emitter(state: Arc<AppState>) -> JoinHandle<()> {
    let interval = state.config.sensor_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; consume that tick so the first reading
        // goes out one full interval after startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let value: u32 = rand::rng().random_range(0..=100);
            let delivered = state
                .hub
                .broadcast(&render(Origin::Sensor, &value.to_string()), None)
                .await;
            tracing::debug!(value, delivered, "sensor reading emitted");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ConnectionHandle;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_emits_reading_every_interval() {
        let config = crate::config::RelayConfig {
            sensor_interval: Duration::from_secs(10),
            ..Default::default()
        };
        let state = Arc::new(AppState::new(config));

        let (tx, mut rx) = mpsc::unbounded_channel();
        state
            .registry
            .add(ConnectionHandle::new("a".to_string(), tx))
            .await
            .unwrap();

        let emitter = spawn_sensor_emitter(state);

        tokio::time::sleep(Duration::from_secs(11)).await;
        let first = rx.recv().await.unwrap();
        assert!(first.starts_with("Sensor reading: "));
        let value: u32 = first
            .strip_prefix("Sensor reading: ")
            .unwrap()
            .parse()
            .expect("reading should be an integer");
        assert!(value <= 100);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let second = rx.recv().await.unwrap();
        assert!(second.starts_with("Sensor reading: "));

        emitter.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_running_with_zero_connections() {
        let config = crate::config::RelayConfig {
            sensor_interval: Duration::from_secs(1),
            ..Default::default()
        };
        let state = Arc::new(AppState::new(config));

        let emitter = spawn_sensor_emitter(state);

        // Several empty ticks must neither error nor stop the task
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!emitter.is_finished());

        emitter.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_cancels_emitter() {
        let state = Arc::new(AppState::default());
        let emitter = spawn_sensor_emitter(state);

        emitter.abort();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(emitter.is_finished());
    }
}
