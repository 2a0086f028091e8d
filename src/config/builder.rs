//! Configuration builder for app clients
//!
//! This module provides a builder pattern for creating app configurations
//! with client-side validation and better ergonomics.

use super::validation::{validate_app_id, validate_base_url, validate_encryption_key};
use super::{AppConfiguration, DEFAULT_AUTHORIZATION_HEADER_NAME, DEFAULT_BASE_URL};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timeout settings for sync connections
///
/// All fields have built-in defaults; use [`AppConfigBuilder::sync_timeouts`]
/// to override individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTimeoutOptions {
    /// Time to wait for a connection to be established
    pub connect_timeout: Duration,
    /// Time a connection is kept open after the last session closes
    pub connection_linger_time: Duration,
    /// Interval between client-sent keepalive pings
    pub ping_keepalive_period: Duration,
    /// Time to wait for the server to answer a keepalive ping
    pub pong_keepalive_period: Duration,
    /// Longest disconnect interval that still triggers a fast reconnect
    pub fast_reconnect_limit: Duration,
}

impl Default for SyncTimeoutOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(120),
            connection_linger_time: Duration::from_secs(30),
            ping_keepalive_period: Duration::from_secs(60),
            pong_keepalive_period: Duration::from_secs(120),
            fast_reconnect_limit: Duration::from_secs(60),
        }
    }
}

/// Sparse override record for [`SyncTimeoutOptions`]
///
/// Only fields that were explicitly set are applied; everything else keeps
/// its default. Merging is field-wise, never full-record replacement.
#[derive(Debug, Clone, Default)]
pub struct SyncTimeoutOverrides {
    connect_timeout: Option<Duration>,
    connection_linger_time: Option<Duration>,
    ping_keepalive_period: Option<Duration>,
    pong_keepalive_period: Option<Duration>,
    fast_reconnect_limit: Option<Duration>,
}

impl SyncTimeoutOverrides {
    /// Override the connection establishment timeout
    pub fn connect_timeout(&mut self, value: Duration) -> &mut Self {
        self.connect_timeout = Some(value);
        self
    }

    /// Override the connection linger time
    pub fn connection_linger_time(&mut self, value: Duration) -> &mut Self {
        self.connection_linger_time = Some(value);
        self
    }

    /// Override the ping keepalive period
    pub fn ping_keepalive_period(&mut self, value: Duration) -> &mut Self {
        self.ping_keepalive_period = Some(value);
        self
    }

    /// Override the pong keepalive period
    pub fn pong_keepalive_period(&mut self, value: Duration) -> &mut Self {
        self.pong_keepalive_period = Some(value);
        self
    }

    /// Override the fast reconnect limit
    pub fn fast_reconnect_limit(&mut self, value: Duration) -> &mut Self {
        self.fast_reconnect_limit = Some(value);
        self
    }

    /// Apply the overrides on top of defaults, field-wise
    fn merge_over_defaults(&self) -> SyncTimeoutOptions {
        let defaults = SyncTimeoutOptions::default();
        SyncTimeoutOptions {
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            connection_linger_time: self
                .connection_linger_time
                .unwrap_or(defaults.connection_linger_time),
            ping_keepalive_period: self
                .ping_keepalive_period
                .unwrap_or(defaults.ping_keepalive_period),
            pong_keepalive_period: self
                .pong_keepalive_period
                .unwrap_or(defaults.pong_keepalive_period),
            fast_reconnect_limit: self
                .fast_reconnect_limit
                .unwrap_or(defaults.fast_reconnect_limit),
        }
    }
}

/// Builder for creating app configurations
///
/// Accumulates optional overrides over built-in defaults and produces a
/// finalized [`AppConfiguration`] from [`build`](Self::build). Every setter
/// is last-call-wins; the builder is consumed by `build()`, so a built
/// configuration can never be affected by later builder mutation.
///
/// A custom request header whose name equals the configured authorization
/// header name is passed through untouched; the builder applies no conflict
/// rule between the two settings.
#[derive(Debug, Clone)]
pub struct AppConfigBuilder {
    app_id: String,
    app_name: Option<String>,
    app_version: Option<String>,
    base_url: Option<String>,
    enable_session_multiplexing: bool,
    timeout_overrides: SyncTimeoutOverrides,
    encryption_key: Option<Vec<u8>>,
    authorization_header_name: Option<String>,
    custom_request_headers: HashMap<String, String>,
}

impl AppConfigBuilder {
    /// Create a new builder for the given application id
    ///
    /// All other fields start at their defaults. The app id is validated at
    /// [`build`](Self::build).
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_name: None,
            app_version: None,
            base_url: None,
            enable_session_multiplexing: false,
            timeout_overrides: SyncTimeoutOverrides::default(),
            encryption_key: None,
            authorization_header_name: None,
            custom_request_headers: HashMap::new(),
        }
    }

    /// Set the app name reported to the backend
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the app version reported to the backend
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Set the base URL of the backend
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Share one underlying connection across sync sessions
    ///
    /// The connection linger default still applies unless overridden through
    /// [`sync_timeouts`](Self::sync_timeouts).
    pub fn enable_session_multiplexing(mut self, enabled: bool) -> Self {
        self.enable_session_multiplexing = enabled;
        self
    }

    /// Override individual sync timeout fields
    ///
    /// Fields not touched by the closure keep their defaults. Repeated calls
    /// accumulate: the last write per field wins.
    ///
    /// ```
    /// use driftsync_rs::config::AppConfigBuilder;
    /// use std::time::Duration;
    ///
    /// let config = AppConfigBuilder::new("my-app-id")
    ///     .enable_session_multiplexing(true)
    ///     .sync_timeouts(|t| {
    ///         t.connection_linger_time(Duration::from_secs(10));
    ///     })
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(
    ///     config.sync_timeouts().connection_linger_time,
    ///     Duration::from_secs(10)
    /// );
    /// ```
    pub fn sync_timeouts<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut SyncTimeoutOverrides),
    {
        configure(&mut self.timeout_overrides);
        self
    }

    /// Set the key used to encrypt client metadata at rest
    ///
    /// Fails with [`AppError::InvalidArgument`](crate::AppError::InvalidArgument)
    /// if the key is not exactly 32 bytes.
    pub fn encryption_key(mut self, key: Vec<u8>) -> Result<Self> {
        validate_encryption_key(&key)?;
        self.encryption_key = Some(key);
        Ok(self)
    }

    /// Override the header name used to carry auth tokens
    pub fn authorization_header_name(mut self, name: impl Into<String>) -> Self {
        self.authorization_header_name = Some(name.into());
        self
    }

    /// Merge custom headers into the set attached to every outgoing request
    ///
    /// Keys are unique; the last write per key wins.
    pub fn custom_request_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_request_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Merge a single custom header
    pub fn custom_request_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.custom_request_headers
            .insert(name.into(), value.into());
        self
    }

    /// Build the configuration with validation
    ///
    /// Performs no network I/O; only client-side validation errors are
    /// raised here.
    pub fn build(self) -> Result<AppConfiguration> {
        validate_app_id(&self.app_id)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        Ok(AppConfiguration::from_parts(
            self.app_id,
            self.app_name,
            self.app_version,
            base_url,
            self.enable_session_multiplexing,
            self.timeout_overrides.merge_over_defaults(),
            self.encryption_key,
            self.authorization_header_name
                .unwrap_or_else(|| DEFAULT_AUTHORIZATION_HEADER_NAME.to_string()),
            self.custom_request_headers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENCRYPTION_KEY_LENGTH;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfigBuilder::new("my-app-id").build().unwrap();

        assert_eq!(config.app_id(), "my-app-id");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(
            config.authorization_header_name(),
            DEFAULT_AUTHORIZATION_HEADER_NAME
        );
        assert!(!config.enable_session_multiplexing());
        assert!(config.app_name().is_none());
        assert!(config.encryption_key().is_none());
        assert!(config.custom_request_headers().is_empty());
        assert_eq!(config.sync_timeouts(), &SyncTimeoutOptions::default());
    }

    #[test]
    fn test_last_call_wins() {
        let config = AppConfigBuilder::new("my-app-id")
            .app_name("first")
            .base_url("http://first.example.com")
            .app_name("second")
            .base_url("http://second.example.com")
            .build()
            .unwrap();

        assert_eq!(config.app_name(), Some("second"));
        assert_eq!(config.base_url(), "http://second.example.com");
    }

    #[test]
    fn test_partial_timeout_override() {
        let config = AppConfigBuilder::new("my-app-id")
            .sync_timeouts(|t| {
                t.connection_linger_time(Duration::from_secs(10));
            })
            .build()
            .unwrap();

        let defaults = SyncTimeoutOptions::default();
        let timeouts = config.sync_timeouts();
        assert_eq!(timeouts.connection_linger_time, Duration::from_secs(10));
        assert_eq!(timeouts.connect_timeout, defaults.connect_timeout);
        assert_eq!(
            timeouts.ping_keepalive_period,
            defaults.ping_keepalive_period
        );
        assert_eq!(
            timeouts.pong_keepalive_period,
            defaults.pong_keepalive_period
        );
        assert_eq!(timeouts.fast_reconnect_limit, defaults.fast_reconnect_limit);
    }

    #[test]
    fn test_timeout_overrides_accumulate() {
        let config = AppConfigBuilder::new("my-app-id")
            .sync_timeouts(|t| {
                t.connect_timeout(Duration::from_secs(60));
            })
            .sync_timeouts(|t| {
                t.connection_linger_time(Duration::from_secs(15))
                    .connect_timeout(Duration::from_secs(90));
            })
            .build()
            .unwrap();

        let timeouts = config.sync_timeouts();
        assert_eq!(timeouts.connect_timeout, Duration::from_secs(90));
        assert_eq!(timeouts.connection_linger_time, Duration::from_secs(15));
    }

    #[test]
    fn test_encryption_key_length_enforced() {
        let result = AppConfigBuilder::new("my-app-id").encryption_key(vec![0u8; 16]);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_invalid_argument());

        let key = vec![42u8; ENCRYPTION_KEY_LENGTH];
        let config = AppConfigBuilder::new("my-app-id")
            .encryption_key(key.clone())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.encryption_key(), Some(key.as_slice()));
    }

    #[test]
    fn test_empty_app_id_rejected_at_build() {
        let result = AppConfigBuilder::new("").build();
        assert!(result.is_err());
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_header_merge_last_write_wins() {
        let config = AppConfigBuilder::new("my-app-id")
            .custom_request_headers([("X-MyApp-Version", "0.9.0"), ("X-Region", "eu")])
            .custom_request_header("X-MyApp-Version", "1.0.0")
            .build()
            .unwrap();

        let headers = config.custom_request_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["X-MyApp-Version"], "1.0.0");
        assert_eq!(headers["X-Region"], "eu");
        // Header merge leaves the auth header name untouched.
        assert_eq!(
            config.authorization_header_name(),
            DEFAULT_AUTHORIZATION_HEADER_NAME
        );
    }

    #[test]
    fn test_builder_does_not_affect_built_instances() {
        let builder = AppConfigBuilder::new("my-app-id").app_name("original");
        let first = builder.clone().build().unwrap();
        let second = builder.app_name("changed").build().unwrap();

        assert_eq!(first.app_name(), Some("original"));
        assert_eq!(second.app_name(), Some("changed"));
    }
}
