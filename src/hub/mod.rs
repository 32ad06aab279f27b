// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The state-synchronization and broadcast hub.
//!
//! This module is the core of the crate. It owns the set of live
//! observer connections and guarantees that every state mutation,
//! from whichever producer, reaches every observer:
//!
//! - [`ConnectionRegistry`] - tracks live connections; add, idempotent
//!   remove, and lock-free-iteration snapshots
//! - [`BroadcastHub`] - fans the current state out to every registered
//!   connection with per-target error isolation, and pushes the
//!   initial state to new connections
//! - [`MutationGateway`] - the single serialized entry point through
//!   which all producers mutate state, so that mutation and broadcast
//!   are observed as one step
//!
//! # Delivery semantics
//!
//! At-least-once within a connection's lifetime, initial-state on
//! connect, per-connection ordering equal to mutation order. A
//! connection whose push fails is evicted and must reconnect to
//! resume receiving updates.

mod broadcast;
mod connection;
mod gateway;
mod registry;

pub use broadcast::BroadcastHub;
pub use connection::{ConnectionId, DEFAULT_CHANNEL_CAPACITY, StateSender};
pub use gateway::MutationGateway;
pub use registry::ConnectionRegistry;
