// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The authoritative device state.

use parking_lot::RwLock;

use crate::types::DeviceStatus;

/// Owner of the single process-wide device status.
///
/// Exactly one instance exists per process, created at startup with
/// the default status ([`DeviceStatus::Off`]) and shared by handle
/// (`Arc`) with the mutation gateway and the broadcast hub. There is
/// no persistence; a restart resets the status.
///
/// All operations are atomic with respect to concurrent callers: a
/// reader never observes a torn or intermediate value. The store has
/// no side effects beyond the stored value - broadcasting a change is
/// the mutation gateway's responsibility.
///
/// # Examples
///
/// ```
/// use switchhub::{DeviceStatus, StateStore};
///
/// let store = StateStore::new();
/// assert_eq!(store.status(), DeviceStatus::Off);
///
/// let previous = store.replace(DeviceStatus::On);
/// assert_eq!(previous, DeviceStatus::Off);
/// assert_eq!(store.toggle(), DeviceStatus::Off);
/// ```
#[derive(Debug, Default)]
pub struct StateStore {
    status: RwLock<DeviceStatus>,
}

impl StateStore {
    /// Creates a store holding the default status (`Off`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given status.
    #[must_use]
    pub fn with_status(status: DeviceStatus) -> Self {
        Self {
            status: RwLock::new(status),
        }
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        *self.status.read()
    }

    /// Replaces the status and returns the previous value.
    ///
    /// Setting the status to its current value is legal; the caller
    /// decides whether a no-op replacement still warrants a broadcast.
    pub fn replace(&self, new: DeviceStatus) -> DeviceStatus {
        std::mem::replace(&mut *self.status.write(), new)
    }

    /// Flips the status and returns the new value.
    pub fn toggle(&self) -> DeviceStatus {
        let mut guard = self.status.write();
        *guard = guard.toggled();
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_off() {
        assert_eq!(StateStore::new().status(), DeviceStatus::Off);
    }

    #[test]
    fn store_with_status() {
        let store = StateStore::with_status(DeviceStatus::On);
        assert_eq!(store.status(), DeviceStatus::On);
    }

    #[test]
    fn replace_returns_previous() {
        let store = StateStore::new();
        assert_eq!(store.replace(DeviceStatus::On), DeviceStatus::Off);
        assert_eq!(store.replace(DeviceStatus::On), DeviceStatus::On);
        assert_eq!(store.status(), DeviceStatus::On);
    }

    #[test]
    fn toggle_returns_new_value() {
        let store = StateStore::new();
        assert_eq!(store.toggle(), DeviceStatus::On);
        assert_eq!(store.toggle(), DeviceStatus::Off);
        assert_eq!(store.status(), DeviceStatus::Off);
    }

    #[test]
    fn concurrent_toggles_stay_consistent() {
        use std::sync::Arc;

        let store = Arc::new(StateStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        store.toggle();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // 8000 toggles from Off lands back on Off.
        assert_eq!(store.status(), DeviceStatus::Off);
    }
}
