// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of state changes to every registered observer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::SendTimeoutError;
use tracing::{debug, warn};

use crate::error::PushError;
use crate::state::{StatePayload, StateStore};

use super::connection::{ConnectionId, StateSender};
use super::registry::ConnectionRegistry;

/// Pushes the current device state to every registered connection.
///
/// Broadcast is best-effort and partial-failure-tolerant: a push that
/// fails or times out removes only the affected connection from the
/// registry and never aborts delivery to the rest. The hub never
/// retries a failed push; a disconnected observer reconnects and
/// receives a fresh initial-state push.
///
/// Each connection receives frames over its own bounded channel, so
/// one slow observer stalls only itself and the values delivered to a
/// single connection are never reordered relative to the mutation
/// sequence.
#[derive(Debug)]
pub struct BroadcastHub {
    store: Arc<StateStore>,
    registry: ConnectionRegistry,
    push_timeout: Duration,
}

impl BroadcastHub {
    /// Default bound on a single per-connection push.
    pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(1);

    /// Creates a hub reading from the given store.
    #[must_use]
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            registry: ConnectionRegistry::new(),
            push_timeout: Self::DEFAULT_PUSH_TIMEOUT,
        }
    }

    /// Sets a custom per-connection push timeout.
    #[must_use]
    pub fn with_push_timeout(mut self, timeout: Duration) -> Self {
        self.push_timeout = timeout;
        self
    }

    /// Returns the connection registry.
    #[must_use]
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Pushes the current state to every registered connection.
    ///
    /// Connections whose push fails are unregistered; the remaining
    /// fan-out continues.
    pub async fn broadcast_current_state(&self) {
        let Some(frame) = self.current_frame() else {
            return;
        };

        for (id, sender) in self.registry.snapshot() {
            if let Err(error) = self.push(&sender, frame.clone()).await {
                warn!(%id, %error, "dropping observer after failed push");
                self.registry.unregister(id);
            }
        }
    }

    /// Pushes the current state to a single just-registered connection.
    ///
    /// This is the mandatory first message every observer receives,
    /// so a new connection learns the state without waiting for the
    /// next mutation.
    ///
    /// # Errors
    ///
    /// Returns [`PushError`] if the connection is closed or the push
    /// times out. The caller is expected to unregister the connection.
    pub async fn send_initial_state(&self, id: ConnectionId, sender: &StateSender) -> Result<(), PushError> {
        let Some(frame) = self.current_frame() else {
            return Ok(());
        };
        debug!(%id, "sending initial state");
        self.push(sender, frame).await
    }

    /// Serializes the store's current status to its wire frame.
    fn current_frame(&self) -> Option<String> {
        match StatePayload::new(self.store.status()).to_frame() {
            Ok(frame) => Some(frame),
            Err(error) => {
                warn!(%error, "failed to serialize state payload");
                None
            }
        }
    }

    async fn push(&self, sender: &StateSender, frame: String) -> Result<(), PushError> {
        sender
            .send_timeout(frame, self.push_timeout)
            .await
            .map_err(|error| match error {
                SendTimeoutError::Closed(_) => PushError::Closed,
                SendTimeoutError::Timeout(_) => PushError::Timeout(
                    u64::try_from(self.push_timeout.as_millis()).unwrap_or(u64::MAX),
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceStatus;
    use tokio::sync::mpsc;

    fn hub() -> BroadcastHub {
        BroadcastHub::new(Arc::new(StateStore::new()))
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let hub = hub();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        hub.registry().register(tx_a);
        hub.registry().register(tx_b);

        hub.store.replace(DeviceStatus::On);
        hub.broadcast_current_state().await;

        assert_eq!(rx_a.recv().await.unwrap(), r#"{"status":"ON"}"#);
        assert_eq!(rx_b.recv().await.unwrap(), r#"{"status":"ON"}"#);
    }

    #[tokio::test]
    async fn failed_push_evicts_only_that_connection() {
        let hub = hub();
        let (tx_dead, rx_dead) = mpsc::channel(4);
        let (tx_live, mut rx_live) = mpsc::channel(4);
        let dead = hub.registry().register(tx_dead);
        hub.registry().register(tx_live);
        drop(rx_dead);

        hub.broadcast_current_state().await;

        // The live observer still got the frame.
        assert_eq!(rx_live.recv().await.unwrap(), r#"{"status":"OFF"}"#);
        // The dead one is gone from the registry.
        assert_eq!(hub.registry().len(), 1);
        assert!(!hub.registry().unregister(dead));
    }

    #[tokio::test]
    async fn slow_observer_times_out_and_is_evicted() {
        let hub = BroadcastHub::new(Arc::new(StateStore::new()))
            .with_push_timeout(Duration::from_millis(10));
        let (tx, mut rx) = mpsc::channel(1);
        hub.registry().register(tx.clone());

        // Fill the single-slot buffer so the next push cannot complete.
        tx.try_send(String::from("backlog")).unwrap();

        hub.broadcast_current_state().await;
        assert!(hub.registry().is_empty());

        // The backlog frame is still there; the timed-out frame is not.
        assert_eq!(rx.recv().await.unwrap(), "backlog");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn initial_state_reflects_current_store_value() {
        let hub = hub();
        hub.store.replace(DeviceStatus::On);

        let (tx, mut rx) = mpsc::channel(4);
        let id = hub.registry().register(tx.clone());
        hub.send_initial_state(id, &tx).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), r#"{"status":"ON"}"#);
    }

    #[tokio::test]
    async fn initial_state_to_closed_connection_errors() {
        let hub = hub();
        let (tx, rx) = mpsc::channel(4);
        let id = hub.registry().register(tx.clone());
        drop(rx);

        let result = hub.send_initial_state(id, &tx).await;
        assert_eq!(result.unwrap_err(), PushError::Closed);
    }

    #[tokio::test]
    async fn broadcast_with_no_connections_is_a_noop() {
        let hub = hub();
        hub.broadcast_current_state().await;
        assert!(hub.registry().is_empty());
    }
}
