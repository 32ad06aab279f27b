// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SMS command parsing and the provider messaging client.
//!
//! Inbound SMS text is mapped to a device command by
//! [`parse_command`]; the webhook handler then routes valid commands
//! through the mutation gateway like any other producer. Outbound
//! confirmation messages go through [`SmsClient`], a thin wrapper
//! around the provider's HTTP messaging API.
//!
//! A provider failure only costs the sender their confirmation text;
//! it never affects the state mutation or the broadcast.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::SmsError;
use crate::types::DeviceStatus;

/// Maps inbound SMS text to a device command.
///
/// The text is trimmed and matched case-insensitively; exactly `"ON"`
/// or `"OFF"` yields a command, anything else is `None` and is
/// ignored by the webhook layer.
///
/// # Examples
///
/// ```
/// use switchhub::{parse_command, DeviceStatus};
///
/// assert_eq!(parse_command("  on \n"), Some(DeviceStatus::On));
/// assert_eq!(parse_command("OFF"), Some(DeviceStatus::Off));
/// assert_eq!(parse_command("turn it on"), None);
/// ```
#[must_use]
pub fn parse_command(text: &str) -> Option<DeviceStatus> {
    text.trim().parse().ok()
}

// ============================================================================
// SmsConfig - Configuration for the provider messaging API
// ============================================================================

/// Configuration for the SMS provider client.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use switchhub::SmsConfig;
///
/// let config = SmsConfig::new("sandbox", "my-api-key")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct SmsConfig {
    username: String,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl SmsConfig {
    /// Default provider API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.africastalking.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given provider account.
    #[must_use]
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the provider base URL (sandbox or test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the provider base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an [`SmsClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<SmsClient, SmsError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(SmsError::Http)?;

        let messaging_url = format!("{}/version1/messaging", self.base_url.trim_end_matches('/'));

        Ok(SmsClient {
            client,
            username: self.username,
            api_key: self.api_key,
            messaging_url,
        })
    }
}

// ============================================================================
// SmsClient
// ============================================================================

/// Client for the provider's HTTP messaging API.
///
/// Sends single outbound messages as a form-encoded POST with the
/// account's API key header, matching the provider's `version1`
/// messaging endpoint.
#[derive(Debug, Clone)]
pub struct SmsClient {
    client: Client,
    username: String,
    api_key: String,
    messaging_url: String,
}

impl SmsClient {
    /// Sends a single message to one recipient.
    ///
    /// # Errors
    ///
    /// Returns [`SmsError::Http`] if the request fails at the
    /// transport level, or [`SmsError::Rejected`] if the provider
    /// answers with a non-success status.
    pub async fn send(&self, to: &str, message: &str) -> Result<(), SmsError> {
        let params = [
            ("username", self.username.as_str()),
            ("to", to),
            ("message", message),
        ];

        let response = self
            .client
            .post(&self.messaging_url)
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmsError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(%to, "confirmation SMS accepted by provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_accepts_exact_commands() {
        assert_eq!(parse_command("ON"), Some(DeviceStatus::On));
        assert_eq!(parse_command("OFF"), Some(DeviceStatus::Off));
    }

    #[test]
    fn parse_command_trims_and_uppercases() {
        assert_eq!(parse_command("  on\n"), Some(DeviceStatus::On));
        assert_eq!(parse_command("\toFf "), Some(DeviceStatus::Off));
    }

    #[test]
    fn parse_command_rejects_everything_else() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("ON OFF"), None);
        assert_eq!(parse_command("please turn on"), None);
        assert_eq!(parse_command("1"), None);
    }

    #[test]
    fn config_builds_messaging_url() {
        let client = SmsConfig::new("user", "key")
            .with_base_url("http://localhost:9999/")
            .into_client()
            .unwrap();
        assert_eq!(client.messaging_url, "http://localhost:9999/version1/messaging");
    }

    #[test]
    fn config_defaults() {
        let config = SmsConfig::new("user", "key");
        assert_eq!(config.base_url(), SmsConfig::DEFAULT_BASE_URL);
        assert_eq!(config.username(), "user");
    }
}
