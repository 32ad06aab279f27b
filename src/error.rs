// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `switchhub` library.
//!
//! Each failure domain carries its own enum: value validation at the
//! request boundary ([`ValueError`]), per-connection push failures
//! during broadcast ([`PushError`]), and SMS provider communication
//! ([`SmsError`]). The domains never compose - a push failure is
//! contained by the hub and an SMS failure by the webhook layer - so
//! there is deliberately no umbrella error type.
//!
//! None of these errors is fatal to the hub. Invalid values are
//! rejected before they reach the state store, push failures are
//! contained to the one connection that failed, and SMS provider
//! errors are logged by the webhook layer without affecting the
//! mutation that triggered them.

use thiserror::Error;

/// Errors related to value validation.
///
/// These occur when a producer supplies something other than the two
/// legal device states. They are raised at the parse boundary and
/// never reach the state store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A string that is neither `"ON"` nor `"OFF"` was provided.
    #[error("invalid device status: {0:?} (expected \"ON\" or \"OFF\")")]
    InvalidStateValue(String),
}

/// Errors raised when pushing a state frame to a single observer.
///
/// A push failure removes the affected connection from the registry
/// and is never surfaced to producers or to other observers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PushError {
    /// The observer's channel is closed (transport gone).
    #[error("connection closed")]
    Closed,

    /// The push did not complete within the configured timeout.
    #[error("push timed out after {0} ms")]
    Timeout(u64),
}

/// Errors related to the SMS provider HTTP API.
#[derive(Debug, Error)]
pub enum SmsError {
    /// The HTTP request to the provider failed.
    #[error("SMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status code.
    #[error("SMS provider rejected the message (HTTP {status})")]
    Rejected {
        /// The HTTP status code returned by the provider.
        status: u16,
    },
}
