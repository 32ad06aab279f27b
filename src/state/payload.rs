// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical wire form of a state change.

use crate::types::DeviceStatus;

/// The JSON payload pushed to observers and served by `GET /state`.
///
/// Serializes to exactly `{"status":"ON"}` or `{"status":"OFF"}`.
/// This is an ephemeral value produced on every mutation (and on
/// every new connection); it is transmitted, never stored.
///
/// # Examples
///
/// ```
/// use switchhub::{DeviceStatus, StatePayload};
///
/// let payload = StatePayload::new(DeviceStatus::On);
/// let json = serde_json::to_string(&payload).unwrap();
/// assert_eq!(json, r#"{"status":"ON"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatePayload {
    /// The device status carried by this payload.
    pub status: DeviceStatus,
}

impl StatePayload {
    /// Creates a payload for the given status.
    #[must_use]
    pub const fn new(status: DeviceStatus) -> Self {
        Self { status }
    }

    /// Serializes the payload to its wire string.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<DeviceStatus> for StatePayload {
    fn from(status: DeviceStatus) -> Self {
        Self::new(status)
    }
}
