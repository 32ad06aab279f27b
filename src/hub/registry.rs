// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of live observer connections.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::connection::{ConnectionId, StateSender};

/// Tracks the set of currently registered observer connections.
///
/// The registry is fully thread-safe: producers, the broadcast path,
/// and connection lifecycle events all touch it concurrently. The
/// lock is held only for map operations, never across a push -
/// [`snapshot`](Self::snapshot) clones the sender handles so that
/// iterating for a broadcast cannot block registration or removal of
/// other connections.
///
/// Connections are removed either explicitly (transport closed) or by
/// the broadcast hub when a push to them fails, so the registry never
/// accumulates dead entries.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, StateSender>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a connection and returns the handle used for removal.
    ///
    /// Never fails.
    pub fn register(&self, sender: StateSender) -> ConnectionId {
        let id = ConnectionId::new();
        self.connections.write().insert(id, sender);
        id
    }

    /// Removes a connection.
    ///
    /// Idempotent: removing a handle that is no longer present is a
    /// no-op, not an error. Returns `true` if the connection was
    /// still registered.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        self.connections.write().remove(&id).is_some()
    }

    /// Returns every connection registered at call time.
    ///
    /// The sender handles are cloned out of the map, so the caller
    /// can push to them without holding the registry lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(ConnectionId, StateSender)> {
        self.connections
            .read()
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect()
    }

    /// Returns the number of registered connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    /// Returns `true` if no connections are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.len())
            .finish()
    }
}
