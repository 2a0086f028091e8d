//! App client handle
//!
//! An [`App`] represents a connection context to one backend application,
//! created from an [`AppConfiguration`]. It performs credential login,
//! session refresh, and teardown; all sync traffic itself is carried by the
//! connection layer configured through the same configuration.

pub mod credentials;
mod http;
pub mod session;

pub use credentials::Credentials;
pub use session::Session;

use crate::config::{AppConfigBuilder, AppConfiguration};
use crate::error::{AppError, Result};
use http::HttpTransport;
use parking_lot::Mutex;
use session::{LoginResponse, RefreshResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};
use uuid::Uuid;

/// Client handle for one backend application
///
/// Cheap to share behind an `Arc`; all methods take `&self`. Closing the
/// handle makes every subsequent operation fail with
/// [`AppError::ClientClosed`].
#[derive(Debug)]
pub struct App {
    config: AppConfiguration,
    transport: HttpTransport,
    device_id: String,
    cached_anonymous: Mutex<Option<Session>>,
    closed: AtomicBool,
}

impl App {
    /// Create an app from a finished configuration
    ///
    /// Performs no network I/O; the first request happens at login.
    pub fn new(config: AppConfiguration) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let device_id = Uuid::new_v4().to_string();

        info!(app_id = %config.app_id(), "app client created");

        Ok(Self {
            config,
            transport,
            device_id,
            cached_anonymous: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    /// Create an app with default configuration values
    pub fn with_app_id(app_id: impl Into<String>) -> Result<Self> {
        Self::new(AppConfigBuilder::new(app_id).build()?)
    }

    /// Get the configuration this app was created from
    pub fn config(&self) -> &AppConfiguration {
        &self.config
    }

    /// Get the client-generated device id attached to logins
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Log in with the given credentials
    ///
    /// Anonymous credentials with `reuse_existing` return the cached
    /// anonymous session from an earlier login on this handle, skipping the
    /// network round trip.
    pub async fn login(&self, credentials: Credentials) -> Result<Session> {
        self.ensure_open()?;

        if let Credentials::Anonymous {
            reuse_existing: true,
        } = credentials
        {
            if let Some(session) = self.cached_anonymous.lock().clone() {
                debug!("reusing cached anonymous session");
                return Ok(session);
            }
        }

        let url = self
            .transport
            .login_url(self.config.app_id(), credentials.provider());
        let mut payload = credentials.payload();
        payload["options"] = serde_json::json!({ "device": { "deviceId": self.device_id } });

        let response: LoginResponse = self.transport.post_json(&url, &payload, None).await?;
        let session = Session::from_login(response, self.device_id.clone());

        if matches!(credentials, Credentials::Anonymous { .. }) {
            *self.cached_anonymous.lock() = Some(session.clone());
        }

        info!(user_id = %session.user_id, provider = credentials.provider(), "login succeeded");
        Ok(session)
    }

    /// Exchange the session's refresh token for a new access token
    ///
    /// The refresh token travels under the configured authorization header
    /// name.
    pub async fn refresh_session(&self, session: &Session) -> Result<Session> {
        self.ensure_open()?;

        let url = self.transport.session_url();
        let response: RefreshResponse = self
            .transport
            .post_json(
                &url,
                &serde_json::json!({}),
                Some((
                    self.config.authorization_header_name(),
                    &session.refresh_token,
                )),
            )
            .await?;

        Ok(session.with_access_token(response.access_token))
    }

    /// Close the app
    ///
    /// Drops the cached anonymous session; subsequent operations fail with
    /// [`AppError::ClientClosed`]. Closing twice is a no-op.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.cached_anonymous.lock().take();
            info!(app_id = %self.config.app_id(), "app client closed");
        }
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(AppError::ClientClosed);
        }
        Ok(())
    }
}
