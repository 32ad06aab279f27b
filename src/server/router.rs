// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axum router construction.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;
use super::ws;

/// Build the complete router.
///
/// Routes:
/// - `GET /ws` -- WebSocket state stream
/// - `GET /state` -- current device state
/// - `POST /control` -- set the state explicitly
/// - `POST /toggle` -- flip the state
/// - `POST /sms/callback` -- inbound SMS command webhook
///
/// CORS allows any origin so browser dashboards can connect from
/// anywhere, matching the permissive setup this service ships with.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws::ws_state))
        .route("/state", get(handlers::get_state))
        .route("/control", post(handlers::control))
        .route("/toggle", post(handlers::toggle))
        .route("/sms/callback", post(handlers::sms_callback))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
