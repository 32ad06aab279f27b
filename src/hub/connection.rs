// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer connection identity and transport handle.

use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Number of serialized state frames buffered per connection.
///
/// A connection whose buffer is full is considered slow; the next
/// push to it times out and the connection is evicted from the
/// registry.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Sending half of an observer connection.
///
/// The receiving half is owned by the task that drains frames into
/// the underlying transport (the WebSocket task in the server layer).
/// Dropping the receiver makes every subsequent push fail, which is
/// how transport closure surfaces to the broadcast hub.
pub type StateSender = mpsc::Sender<String>;

/// Unique identifier for a registered observer connection.
///
/// This is a wrapper around UUID v4 that provides a distinct type for
/// connection identification. The identifier is returned on
/// registration and used later for idempotent removal.
///
/// # Examples
///
/// ```
/// use switchhub::ConnectionId;
///
/// let id = ConnectionId::new();
/// assert_ne!(id, ConnectionId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Creates a new unique connection identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a connection identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}
