// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state ownership and its wire representation.
//!
//! [`StateStore`] holds the single authoritative device status;
//! [`StatePayload`] is the JSON projection pushed to observers.

mod payload;
mod store;

pub use payload::StatePayload;
pub use store::StateStore;
