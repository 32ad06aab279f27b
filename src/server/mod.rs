// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The thin HTTP surface over the hub.
//!
//! Every route here is a stateless wrapper: the REST handlers and the
//! SMS webhook route mutations through the [`MutationGateway`], and
//! the WebSocket endpoint attaches observers to it. Nothing in this
//! module holds device state of its own.

mod handlers;
mod router;
mod ws;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::hub::MutationGateway;
use crate::sms::SmsClient;

pub use handlers::{ApiError, ControlRequest, ControlResponse, SmsCallbackResponse, SmsInbound};
pub use router::build_router;

/// Shared state injected into every handler.
///
/// Cloning is cheap; both fields are reference-counted handles.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single mutation entry point all producers share.
    pub gateway: Arc<MutationGateway>,
    /// Outbound SMS client, absent when no provider credentials are
    /// configured. The webhook still mutates state without it; only
    /// the confirmation reply is skipped.
    pub sms: Option<Arc<SmsClient>>,
}

impl AppState {
    /// Creates state for a gateway with no SMS provider configured.
    #[must_use]
    pub fn new(gateway: Arc<MutationGateway>) -> Self {
        Self { gateway, sms: None }
    }

    /// Attaches an SMS provider client.
    #[must_use]
    pub fn with_sms(mut self, sms: Arc<SmsClient>) -> Self {
        self.sms = Some(sms);
        self
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8000,
        }
    }
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Starts the HTTP server and runs it until the process terminates.
///
/// # Errors
///
/// Returns [`ServerError`] if the address is invalid, the listener
/// cannot bind, or the server hits a fatal I/O error.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "switchhub listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    Ok(())
}
