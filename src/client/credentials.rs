//! Login credentials for backend auth providers

use serde_json::json;

/// Credentials accepted by [`App::login`](crate::client::App::login)
///
/// Each variant maps to one backend auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Anonymous login
    Anonymous {
        /// Reuse the cached anonymous session from an earlier login on the
        /// same app handle instead of creating a new backend user
        reuse_existing: bool,
    },
    /// Email/password login
    EmailPassword {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Server API key login
    ApiKey(String),
}

impl Credentials {
    /// Anonymous credentials
    ///
    /// With `reuse_existing` set, a later login returns the anonymous
    /// session cached on the app handle when one exists.
    pub fn anonymous(reuse_existing: bool) -> Self {
        Credentials::Anonymous { reuse_existing }
    }

    /// Email/password credentials
    pub fn email_password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::EmailPassword {
            email: email.into(),
            password: password.into(),
        }
    }

    /// API key credentials
    pub fn api_key(key: impl Into<String>) -> Self {
        Credentials::ApiKey(key.into())
    }

    /// Path segment identifying the auth provider on the backend
    pub fn provider(&self) -> &'static str {
        match self {
            Credentials::Anonymous { .. } => "anon-user",
            Credentials::EmailPassword { .. } => "local-userpass",
            Credentials::ApiKey(_) => "api-key",
        }
    }

    /// JSON payload sent to the provider's login endpoint
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Credentials::Anonymous { .. } => json!({}),
            Credentials::EmailPassword { email, password } => json!({
                "username": email,
                "password": password,
            }),
            Credentials::ApiKey(key) => json!({ "key": key }),
        }
    }
}
