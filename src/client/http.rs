//! HTTP transport for app clients
//!
//! Builds a `reqwest` client from an [`AppConfiguration`] and maps transport
//! and status failures to [`AppError`]. Every outgoing header is reported to
//! the client log at `Debug`, with token values redacted.

use crate::config::AppConfiguration;
use crate::error::{AppError, Result};
use crate::logging::{self, LogLevel};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

const CLIENT_API_PREFIX: &str = "api/client/v2.0";

/// Transport shared by all requests of one [`App`](crate::client::App)
#[derive(Debug)]
pub(crate) struct HttpTransport {
    http_client: reqwest::Client,
    base_url: String,
    custom_headers: Vec<(String, String)>,
}

impl HttpTransport {
    /// Build the transport from a configuration; performs no network I/O
    pub(crate) fn new(config: &AppConfiguration) -> Result<Self> {
        let default_headers = build_header_map(config.custom_request_headers())?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(config.sync_timeouts().connect_timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                AppError::InvalidArgument(format!("failed to create HTTP client: {}", e))
            })?;

        let mut custom_headers: Vec<(String, String)> = config
            .custom_request_headers()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        custom_headers.sort();

        Ok(Self {
            http_client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            custom_headers,
        })
    }

    /// URL of the login endpoint for one auth provider
    pub(crate) fn login_url(&self, app_id: &str, provider: &str) -> String {
        format!(
            "{}/{}/app/{}/auth/providers/{}/login",
            self.base_url, CLIENT_API_PREFIX, app_id, provider
        )
    }

    /// URL of the session refresh endpoint
    pub(crate) fn session_url(&self) -> String {
        format!("{}/{}/auth/session", self.base_url, CLIENT_API_PREFIX)
    }

    /// POST a JSON body, optionally carrying a token under the given header
    ///
    /// Returns the parsed JSON response on 2xx, a typed error otherwise.
    pub(crate) async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
        auth_header: Option<(&str, &str)>,
    ) -> Result<T> {
        debug!("POST {}", url);
        self.report_headers(auth_header.map(|(name, _)| name));

        let mut request = self.http_client.post(url).json(body);
        if let Some((name, token)) = auth_header {
            request = request.header(
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    AppError::InvalidArgument(format!("invalid header name '{}': {}", name, e))
                })?,
                format!("Bearer {}", token),
            );
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await.map_err(map_transport_error)?);
        }

        let message = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidCredentials(if message.is_empty() {
                "credentials rejected by backend".to_string()
            } else {
                message
            }));
        }

        Err(AppError::Service {
            status: status.as_u16(),
            message,
        })
    }

    /// Report every outgoing header to the client log at `Debug`
    ///
    /// Token values never reach the log, only the header name.
    fn report_headers(&self, auth_header_name: Option<&str>) {
        for (name, value) in &self.custom_headers {
            logging::log(LogLevel::Debug, &format!("-> {}: {}", name, value));
        }
        if let Some(name) = auth_header_name {
            logging::log(LogLevel::Debug, &format!("-> {}: [redacted]", name));
        }
    }
}

fn build_header_map(headers: &std::collections::HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            AppError::InvalidArgument(format!("invalid header name '{}': {}", name, e))
        })?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidArgument(format!("invalid header value: {}", e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn map_transport_error(error: reqwest::Error) -> AppError {
    if error.is_connect() || error.is_timeout() || error.is_request() {
        AppError::Connection(error.to_string())
    } else {
        AppError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfigBuilder;

    fn transport_for(config: crate::config::AppConfiguration) -> HttpTransport {
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn test_url_assembly() {
        let config = AppConfigBuilder::new("my-app-id")
            .base_url("http://localhost:9090/")
            .build()
            .unwrap();
        let transport = transport_for(config);

        assert_eq!(
            transport.login_url("my-app-id", "anon-user"),
            "http://localhost:9090/api/client/v2.0/app/my-app-id/auth/providers/anon-user/login"
        );
        assert_eq!(
            transport.session_url(),
            "http://localhost:9090/api/client/v2.0/auth/session"
        );
    }

    #[test]
    fn test_invalid_custom_header_rejected() {
        let config = AppConfigBuilder::new("my-app-id")
            .custom_request_header("bad header name", "value")
            .build()
            .unwrap();

        let result = HttpTransport::new(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_invalid_argument());
    }
}
