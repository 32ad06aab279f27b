// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The two-valued device status.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The power status of the controlled device.
///
/// The device is always in exactly one of two states. The wire
/// representation (JSON and SMS commands alike) is the uppercase
/// string `"ON"` or `"OFF"`.
///
/// # Examples
///
/// ```
/// use switchhub::DeviceStatus;
///
/// let on = DeviceStatus::On;
/// assert_eq!(on.as_str(), "ON");
/// assert_eq!(on.toggled(), DeviceStatus::Off);
///
/// let parsed: DeviceStatus = "off".parse().unwrap();
/// assert_eq!(parsed, DeviceStatus::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    /// The device is powered off. This is the state at process start.
    #[default]
    Off,
    /// The device is powered on.
    On,
}

impl DeviceStatus {
    /// Returns the wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Returns `true` if the device is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Parses the exact wire string, `"ON"` or `"OFF"`.
    ///
    /// Unlike the [`FromStr`] impl this performs no case folding or
    /// trimming: the JSON control API accepts only the canonical
    /// uppercase form, while SMS text is normalized by the webhook
    /// layer before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidStateValue`] for anything else.
    pub fn from_wire(s: &str) -> Result<Self, ValueError> {
        match s {
            "OFF" => Ok(Self::Off),
            "ON" => Ok(Self::On),
            _ => Err(ValueError::InvalidStateValue(s.to_string())),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "ON" => Ok(Self::On),
            _ => Err(ValueError::InvalidStateValue(s.to_string())),
        }
    }
}

impl From<bool> for DeviceStatus {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
