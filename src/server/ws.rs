// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WebSocket endpoint for real-time state observation.
//!
//! A client connecting to `GET /ws` is attached to the hub and
//! immediately receives the current state as `{"status":"ON"|"OFF"}`;
//! after that it receives one frame per mutation, in mutation order.
//! Closing the socket at any time is safe: the connection is detached
//! and any in-flight push to it simply errors and triggers cleanup on
//! the hub side.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::debug;

use crate::hub::DEFAULT_CHANNEL_CAPACITY;

use super::AppState;

/// Upgrade an HTTP request to a WebSocket connection and begin
/// streaming state changes.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_state(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the WebSocket lifecycle: attach to the hub, forward each
/// state frame as a text message, detach on close.
async fn handle_ws(mut socket: WebSocket, state: AppState) {
    let (tx, mut rx) = tokio::sync::mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
    let id = state.gateway.attach(tx).await;
    debug!(%id, "WebSocket observer connected");

    loop {
        tokio::select! {
            // A state frame from the hub.
            frame = rx.recv() => {
                match frame {
                    Some(json) => {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!(%id, "WebSocket observer disconnected (send failed)");
                            break;
                        }
                    }
                    // The hub evicted this connection (push failure).
                    None => break,
                }
            }
            // Client-side traffic: only close and ping matter.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%id, "WebSocket observer disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(error)) => {
                        debug!(%id, %error, "WebSocket error");
                        break;
                    }
                    // Ignore text/binary from the client; observers
                    // are read-only.
                    _ => {}
                }
            }
        }
    }

    state.gateway.detach(id);
}
