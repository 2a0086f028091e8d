//! # Driftsync-RS
//!
//! Rust client SDK for Driftsync App Services. Configure an app client with
//! layered optional settings, authenticate with backend credentials, and
//! manage the resulting session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use driftsync_rs::{App, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Creates an app with default configuration values
//!     let app = App::with_app_id("my-app-id")?;
//!
//!     let session = app.login(Credentials::anonymous(false)).await?;
//!     println!("Logged in as {}", session.user_id);
//!
//!     app.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Custom configuration
//!
//! ```rust
//! use driftsync_rs::config::AppConfigBuilder;
//! use std::time::Duration;
//!
//! let config = AppConfigBuilder::new("my-app-id")
//!     .app_name("my-app-name")
//!     .app_version("1.0.0")
//!     .base_url("http://localhost:9090")
//!     .enable_session_multiplexing(true)
//!     .sync_timeouts(|t| {
//!         t.connection_linger_time(Duration::from_secs(10));
//!     })
//!     .authorization_header_name("MyApp-Authorization")
//!     .custom_request_header("X-MyApp-Version", "1.0.0")
//!     .build()?;
//! # Ok::<(), driftsync_rs::AppError>(())
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod logging;

// Re-export main types
pub use client::{App, Credentials, Session};
pub use config::{AppConfigBuilder, AppConfiguration, SyncTimeoutOptions};
pub use error::{AppError, Result};
pub use logging::{LogLevel, LogObserver};

/// Initialize the SDK with default logging
pub fn init() {
    tracing_subscriber::fmt::init();
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
