// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The single choke point for state mutations.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::state::StateStore;
use crate::types::DeviceStatus;

use super::broadcast::BroadcastHub;
use super::connection::{ConnectionId, StateSender};

/// Routes every state mutation through one serialized path.
///
/// All producers - the HTTP control handler, the toggle handler, and
/// the SMS webhook - call [`apply_control`](Self::apply_control) or
/// [`apply_toggle`](Self::apply_toggle) instead of touching the state
/// store directly. The gateway guarantees that every mutation is
/// followed by exactly one broadcast, and that concurrent mutations
/// are linearized: each mutation+broadcast pair completes before the
/// next is admitted, so observers never see interleaved updates on
/// the wire.
///
/// Observer lifecycle goes through the same lock:
/// [`attach`](Self::attach) registers a connection and sends it the
/// initial state atomically with respect to mutations, so no
/// broadcast can slip in between registration and the initial push.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use switchhub::{BroadcastHub, DeviceStatus, MutationGateway, StateStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = Arc::new(StateStore::new());
/// let hub = BroadcastHub::new(Arc::clone(&store));
/// let gateway = MutationGateway::new(store, hub);
///
/// assert_eq!(gateway.apply_control(DeviceStatus::On).await, DeviceStatus::On);
/// assert_eq!(gateway.apply_toggle().await, DeviceStatus::Off);
/// # }
/// ```
#[derive(Debug)]
pub struct MutationGateway {
    store: Arc<StateStore>,
    hub: BroadcastHub,
    mutation_lock: Mutex<()>,
}

impl MutationGateway {
    /// Creates a gateway over the given store and hub.
    ///
    /// The hub must read from the same store, so that the broadcast
    /// following a mutation carries the value that mutation produced.
    #[must_use]
    pub fn new(store: Arc<StateStore>, hub: BroadcastHub) -> Self {
        Self {
            store,
            hub,
            mutation_lock: Mutex::new(()),
        }
    }

    /// Returns the current device status without mutating anything.
    #[must_use]
    pub fn current(&self) -> DeviceStatus {
        self.store.status()
    }

    /// Returns the broadcast hub.
    #[must_use]
    pub fn hub(&self) -> &BroadcastHub {
        &self.hub
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Sets the device status to the requested value and broadcasts.
    ///
    /// Idempotent: requesting the current value is legal and still
    /// produces exactly one broadcast. Returns the new status.
    pub async fn apply_control(&self, requested: DeviceStatus) -> DeviceStatus {
        let _guard = self.mutation_lock.lock().await;
        let previous = self.store.replace(requested);
        info!(%previous, new = %requested, "control applied");
        self.hub.broadcast_current_state().await;
        requested
    }

    /// Flips the device status and broadcasts. Returns the new status.
    pub async fn apply_toggle(&self) -> DeviceStatus {
        let _guard = self.mutation_lock.lock().await;
        let new = self.store.toggle();
        info!(%new, "toggle applied");
        self.hub.broadcast_current_state().await;
        new
    }

    // =========================================================================
    // Observer lifecycle
    // =========================================================================

    /// Registers an observer connection and sends it the current state.
    ///
    /// The registration and the initial push happen under the
    /// mutation lock, so the first frame the observer receives is the
    /// state current at registration time and every later broadcast
    /// follows it in mutation order. If the initial push fails the
    /// connection is unregistered again.
    pub async fn attach(&self, sender: StateSender) -> ConnectionId {
        let _guard = self.mutation_lock.lock().await;
        let id = self.hub.registry().register(sender.clone());
        debug!(%id, observers = self.hub.registry().len(), "observer attached");

        if let Err(error) = self.hub.send_initial_state(id, &sender).await {
            warn!(%id, %error, "initial push failed, dropping observer");
            self.hub.registry().unregister(id);
        }
        id
    }

    /// Removes an observer connection.
    ///
    /// Idempotent; detaching a connection the hub already evicted is
    /// a no-op.
    pub fn detach(&self, id: ConnectionId) -> bool {
        let removed = self.hub.registry().unregister(id);
        if removed {
            debug!(%id, observers = self.hub.registry().len(), "observer detached");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn gateway() -> MutationGateway {
        let store = Arc::new(StateStore::new());
        let hub = BroadcastHub::new(Arc::clone(&store));
        MutationGateway::new(store, hub)
    }

    #[tokio::test]
    async fn control_sets_and_returns_new_status() {
        let gateway = gateway();
        assert_eq!(
            gateway.apply_control(DeviceStatus::On).await,
            DeviceStatus::On
        );
        assert_eq!(gateway.current(), DeviceStatus::On);
    }

    #[tokio::test]
    async fn mutations_fold_over_initial_off() {
        let gateway = gateway();
        gateway.apply_control(DeviceStatus::On).await;
        gateway.apply_toggle().await;
        gateway.apply_control(DeviceStatus::Off).await;
        gateway.apply_toggle().await;
        assert_eq!(gateway.current(), DeviceStatus::On);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original() {
        let gateway = gateway();
        let original = gateway.current();
        gateway.apply_toggle().await;
        gateway.apply_toggle().await;
        assert_eq!(gateway.current(), original);
    }

    #[tokio::test]
    async fn noop_control_still_broadcasts() {
        let gateway = gateway();
        let (tx, mut rx) = mpsc::channel(4);
        gateway.attach(tx).await;
        assert_eq!(rx.recv().await.unwrap(), r#"{"status":"OFF"}"#);

        // Setting OFF while already OFF still produces a frame.
        gateway.apply_control(DeviceStatus::Off).await;
        assert_eq!(rx.recv().await.unwrap(), r#"{"status":"OFF"}"#);
    }

    #[tokio::test]
    async fn each_mutation_produces_exactly_one_frame() {
        let gateway = gateway();
        let (tx, mut rx) = mpsc::channel(8);
        gateway.attach(tx).await;
        rx.recv().await.unwrap(); // initial state

        gateway.apply_control(DeviceStatus::On).await;
        gateway.apply_toggle().await;

        assert_eq!(rx.recv().await.unwrap(), r#"{"status":"ON"}"#);
        assert_eq!(rx.recv().await.unwrap(), r#"{"status":"OFF"}"#);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn attach_sends_state_current_at_registration() {
        let gateway = gateway();
        gateway.apply_control(DeviceStatus::On).await;

        let (tx, mut rx) = mpsc::channel(4);
        gateway.attach(tx).await;
        assert_eq!(rx.recv().await.unwrap(), r#"{"status":"ON"}"#);
    }

    #[tokio::test]
    async fn attach_with_closed_transport_leaves_no_entry() {
        let gateway = gateway();
        let (tx, rx) = mpsc::channel(4);
        drop(rx);

        gateway.attach(tx).await;
        assert!(gateway.hub().registry().is_empty());
    }

    #[tokio::test]
    async fn detach_is_idempotent() {
        let gateway = gateway();
        let (tx, _rx) = mpsc::channel(4);
        let id = gateway.attach(tx).await;

        assert!(gateway.detach(id));
        assert!(!gateway.detach(id));
    }
}
