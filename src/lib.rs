// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `switchhub` - a real-time synchronization hub for a shared device
//! switch state.
//!
//! The service owns a single binary device state (`ON`/`OFF`) and
//! keeps any number of live WebSocket observers synchronized with it,
//! no matter which producer changed it last: the HTTP control API,
//! the toggle endpoint, or an inbound SMS command.
//!
//! # Architecture
//!
//! - [`StateStore`] owns the authoritative state
//! - [`ConnectionRegistry`] tracks live observer connections
//! - [`BroadcastHub`] fans every change out to all observers and
//!   sends each new observer the current state on connect
//! - [`MutationGateway`] is the single serialized entry point all
//!   producers mutate through, so every mutation is followed by
//!   exactly one broadcast
//!
//! The HTTP routes, the WebSocket endpoint, and the SMS provider
//! client are thin wrappers around this core (see [`server`] and
//! [`sms`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use switchhub::{
//!     AppState, BroadcastHub, MutationGateway, ServerConfig, StateStore, serve,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), switchhub::ServerError> {
//!     let store = Arc::new(StateStore::new());
//!     let hub = BroadcastHub::new(Arc::clone(&store));
//!     let gateway = Arc::new(MutationGateway::new(store, hub));
//!
//!     serve(&ServerConfig::default(), AppState::new(gateway)).await
//! }
//! ```
//!
//! # Driving the hub directly
//!
//! ```
//! use std::sync::Arc;
//! use switchhub::{BroadcastHub, DeviceStatus, MutationGateway, StateStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(StateStore::new());
//! let hub = BroadcastHub::new(Arc::clone(&store));
//! let gateway = MutationGateway::new(store, hub);
//!
//! // Attach an observer; it immediately receives the current state.
//! let (tx, mut rx) = tokio::sync::mpsc::channel(32);
//! gateway.attach(tx).await;
//! assert_eq!(rx.recv().await.unwrap(), r#"{"status":"OFF"}"#);
//!
//! // Every mutation reaches the observer, in order.
//! gateway.apply_control(DeviceStatus::On).await;
//! assert_eq!(rx.recv().await.unwrap(), r#"{"status":"ON"}"#);
//! # }
//! ```

pub mod error;
pub mod hub;
pub mod server;
pub mod sms;
pub mod state;
pub mod types;

pub use error::{PushError, SmsError, ValueError};
pub use hub::{
    BroadcastHub, ConnectionId, ConnectionRegistry, DEFAULT_CHANNEL_CAPACITY, MutationGateway,
    StateSender,
};
pub use server::{AppState, ServerConfig, ServerError, build_router, serve};
pub use sms::{SmsClient, SmsConfig, parse_command};
pub use state::{StatePayload, StateStore};
pub use types::DeviceStatus;
