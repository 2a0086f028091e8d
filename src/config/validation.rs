//! Client-side configuration validation
//!
//! All checks here are pure and synchronous; network and auth failures are
//! the backend's to report, never the builder's.

use super::ENCRYPTION_KEY_LENGTH;
use crate::error::{AppError, Result};
use url::Url;

/// Validate that the application id is non-empty
pub fn validate_app_id(app_id: &str) -> Result<()> {
    if app_id.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "app id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate that the base URL is well-formed
///
/// The URL must parse, use an http or https scheme, and carry a host.
/// Local addresses are allowed: pointing a client at a dev server on
/// `http://localhost:9090` is a supported workflow.
pub fn validate_base_url(url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| AppError::InvalidArgument(format!("base URL is not valid: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::InvalidArgument(format!(
                "base URL must use http:// or https:// scheme, got: {}",
                scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(AppError::InvalidArgument(
            "base URL must have a valid host".to_string(),
        ));
    }

    Ok(())
}

/// Validate that the encryption key is exactly 32 bytes (256-bit)
pub fn validate_encryption_key(key: &[u8]) -> Result<()> {
    if key.len() != ENCRYPTION_KEY_LENGTH {
        return Err(AppError::InvalidArgument(format!(
            "encryption key must be exactly {} bytes, got {}",
            ENCRYPTION_KEY_LENGTH,
            key.len()
        )));
    }
    Ok(())
}
