// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! REST and webhook handlers.
//!
//! These are the producers of the system. Each one validates its
//! input at the boundary, routes the mutation through the gateway,
//! and shapes the response; none of them touches the state store
//! directly.

use axum::Json;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::error::ValueError;
use crate::sms::parse_command;
use crate::state::StatePayload;
use crate::types::DeviceStatus;

use super::AppState;

/// Body of a `POST /control` request.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ControlRequest {
    /// Requested device status, `"ON"` or `"OFF"`.
    pub status: String,
}

/// Success response for control and toggle requests.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ControlResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// Human-readable confirmation.
    pub message: String,
    /// The device state after the mutation.
    pub current_state: StatePayload,
}

impl ControlResponse {
    fn success(message: String, status: DeviceStatus) -> Self {
        Self {
            status: "success",
            message,
            current_state: StatePayload::new(status),
        }
    }
}

/// Response for the SMS webhook.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SmsCallbackResponse {
    /// Always `"success"`; invalid commands are ignored, not errors.
    pub status: &'static str,
    /// The confirmation text also sent back to the sender by SMS.
    pub message: String,
}

/// Errors surfaced to HTTP callers.
///
/// Serialized as `{"status": "error", "message": "<text>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request carried something other than the two legal states.
    #[error("{0}")]
    InvalidStateValue(#[from] ValueError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// `GET /state` - the current device state.
pub async fn get_state(State(state): State<AppState>) -> Json<StatePayload> {
    Json(StatePayload::new(state.gateway.current()))
}

/// `POST /control` - set the device state explicitly.
///
/// The body must carry the exact wire form `"ON"` or `"OFF"`; unlike
/// SMS text, control requests are not case-normalized.
pub async fn control(
    State(state): State<AppState>,
    Json(request): Json<ControlRequest>,
) -> Result<Json<ControlResponse>, ApiError> {
    let requested = DeviceStatus::from_wire(&request.status)?;
    let new = state.gateway.apply_control(requested).await;

    Ok(Json(ControlResponse::success(
        format!("Device has been turned {new}"),
        new,
    )))
}

/// `POST /toggle` - flip the device state.
pub async fn toggle(State(state): State<AppState>) -> Json<ControlResponse> {
    let new = state.gateway.apply_toggle().await;
    Json(ControlResponse::success(
        format!("Device has been toggled to {new}"),
        new,
    ))
}

/// Form fields delivered by the SMS provider's inbound webhook.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SmsInbound {
    /// The message text.
    #[serde(default)]
    pub text: String,
    /// The sender's phone number.
    #[serde(default)]
    pub from: String,
}

/// `POST /sms/callback` - inbound SMS command.
///
/// Valid commands (`ON`/`OFF` after trimming, any case) go through
/// the gateway; anything else mutates nothing. Either way the sender
/// gets a confirmation SMS when a provider client is configured, and
/// the webhook itself always answers success so the provider does not
/// retry.
pub async fn sms_callback(
    State(state): State<AppState>,
    Form(inbound): Form<SmsInbound>,
) -> Json<SmsCallbackResponse> {
    let message = match parse_command(&inbound.text) {
        Some(command) => {
            let new = state.gateway.apply_control(command).await;
            format!("Device has been turned {new}")
        }
        None => {
            debug!(text = %inbound.text, "ignoring non-command SMS");
            String::from("Invalid command. Please send either 'ON' or 'OFF'")
        }
    };

    match (&state.sms, inbound.from.is_empty()) {
        (Some(sms), false) => {
            if let Err(error) = sms.send(&inbound.from, &message).await {
                warn!(%error, to = %inbound.from, "failed to send confirmation SMS");
            }
        }
        _ => debug!("skipping confirmation SMS (no client or no sender number)"),
    }

    Json(SmsCallbackResponse {
        status: "success",
        message,
    })
}
