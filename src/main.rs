// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server binary: wires the hub together and serves the HTTP surface.
//!
//! Configuration comes from the environment:
//!
//! - `SWITCHHUB_HOST` / `SWITCHHUB_PORT` -- bind address (default
//!   `0.0.0.0:8000`)
//! - `AT_USERNAME` / `AT_API_KEY` -- SMS provider credentials; when
//!   absent the webhook still works but confirmation replies are
//!   skipped
//! - `RUST_LOG` -- tracing filter (default `info`)

use std::sync::Arc;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use switchhub::{
    AppState, BroadcastHub, MutationGateway, ServerConfig, SmsConfig, StateStore, serve,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn sms_client() -> Option<switchhub::SmsClient> {
    let (Ok(username), Ok(api_key)) = (std::env::var("AT_USERNAME"), std::env::var("AT_API_KEY"))
    else {
        warn!("AT_USERNAME/AT_API_KEY not set, SMS confirmations disabled");
        return None;
    };

    match SmsConfig::new(username, api_key).into_client() {
        Ok(client) => Some(client),
        Err(error) => {
            warn!(%error, "failed to build SMS client, SMS confirmations disabled");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig {
        host: env_or("SWITCHHUB_HOST", "0.0.0.0"),
        port: env_or("SWITCHHUB_PORT", "8000").parse().unwrap_or_else(|_| {
            warn!("invalid SWITCHHUB_PORT, falling back to 8000");
            8000
        }),
    };

    let store = Arc::new(StateStore::new());
    let hub = BroadcastHub::new(Arc::clone(&store));
    let gateway = Arc::new(MutationGateway::new(store, hub));

    let mut state = AppState::new(gateway);
    if let Some(client) = sms_client() {
        state = state.with_sms(Arc::new(client));
    }

    if let Err(err) = serve(&config, state).await {
        error!(%err, "server exited with error");
        std::process::exit(1);
    }
}
