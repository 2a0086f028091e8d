//! Configuration for app clients
//!
//! This module holds the immutable [`AppConfiguration`] value consumed by
//! [`App`](crate::client::App) and the builder used to construct it.

pub mod builder;
pub mod validation;

pub use builder::{AppConfigBuilder, SyncTimeoutOptions, SyncTimeoutOverrides};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default base URL for the production backend
pub const DEFAULT_BASE_URL: &str = "https://services.driftsync.cloud";

/// Default header name used to carry auth tokens
pub const DEFAULT_AUTHORIZATION_HEADER_NAME: &str = "Authorization";

/// Required encryption key length in bytes (256-bit)
pub const ENCRYPTION_KEY_LENGTH: usize = 32;

/// Immutable configuration for an app client
///
/// Produced by [`AppConfigBuilder::build`]; once built, a configuration is
/// never mutated and can be shared freely across threads. Building another
/// configuration from the same builder chain never affects instances built
/// earlier.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfiguration {
    app_id: String,
    app_name: Option<String>,
    app_version: Option<String>,
    base_url: String,
    enable_session_multiplexing: bool,
    sync_timeouts: SyncTimeoutOptions,
    // The key never leaves the process: not in Debug output, not in
    // serialized form. Deserialized configurations start without one.
    #[serde(skip)]
    encryption_key: Option<Vec<u8>>,
    authorization_header_name: String,
    custom_request_headers: HashMap<String, String>,
}

impl AppConfiguration {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        app_id: String,
        app_name: Option<String>,
        app_version: Option<String>,
        base_url: String,
        enable_session_multiplexing: bool,
        sync_timeouts: SyncTimeoutOptions,
        encryption_key: Option<Vec<u8>>,
        authorization_header_name: String,
        custom_request_headers: HashMap<String, String>,
    ) -> Self {
        Self {
            app_id,
            app_name,
            app_version,
            base_url,
            enable_session_multiplexing,
            sync_timeouts,
            encryption_key,
            authorization_header_name,
            custom_request_headers,
        }
    }

    /// Get the backend application id
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Get the app name reported to the backend, if set
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Get the app version reported to the backend, if set
    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether sync sessions share one underlying connection
    pub fn enable_session_multiplexing(&self) -> bool {
        self.enable_session_multiplexing
    }

    /// Get the sync connection timeout settings
    pub fn sync_timeouts(&self) -> &SyncTimeoutOptions {
        &self.sync_timeouts
    }

    /// Get the metadata encryption key, if set
    pub fn encryption_key(&self) -> Option<&[u8]> {
        self.encryption_key.as_deref()
    }

    /// Get the header name used to carry auth tokens
    pub fn authorization_header_name(&self) -> &str {
        &self.authorization_header_name
    }

    /// Get the custom headers attached to every outgoing request
    pub fn custom_request_headers(&self) -> &HashMap<String, String> {
        &self.custom_request_headers
    }
}

// The encryption key never appears in logs or debug output.
impl fmt::Debug for AppConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfiguration")
            .field("app_id", &self.app_id)
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("base_url", &self.base_url)
            .field(
                "enable_session_multiplexing",
                &self.enable_session_multiplexing,
            )
            .field("sync_timeouts", &self.sync_timeouts)
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|k| format!("[{} bytes]", k.len())),
            )
            .field("authorization_header_name", &self.authorization_header_name)
            .field("custom_request_headers", &self.custom_request_headers)
            .finish()
    }
}
