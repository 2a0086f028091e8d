//! Session and wire-level auth types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated session returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Backend user id
    pub user_id: String,
    /// Client-generated device id attached to the login
    pub device_id: String,
    /// Short-lived token for authenticated requests
    pub access_token: String,
    /// Long-lived token used to refresh the access token
    pub refresh_token: String,
    /// When this session was obtained
    pub logged_in_at: DateTime<Utc>,
}

/// Wire format of the backend login response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Wire format of the backend session refresh response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access_token: String,
}

impl Session {
    pub(crate) fn from_login(response: LoginResponse, device_id: String) -> Self {
        Self {
            user_id: response.user_id,
            device_id,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            logged_in_at: Utc::now(),
        }
    }

    /// Copy of this session carrying a refreshed access token
    pub(crate) fn with_access_token(&self, access_token: String) -> Self {
        Self {
            access_token,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_login_response() {
        let response: LoginResponse = serde_json::from_str(
            r#"{
                "user_id": "user-1",
                "access_token": "at",
                "refresh_token": "rt"
            }"#,
        )
        .unwrap();

        let session = Session::from_login(response, "device-1".to_string());
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.device_id, "device-1");
        assert_eq!(session.access_token, "at");
        assert_eq!(session.refresh_token, "rt");
    }

    #[test]
    fn test_refresh_keeps_identity() {
        let session = Session {
            user_id: "user-1".to_string(),
            device_id: "device-1".to_string(),
            access_token: "old".to_string(),
            refresh_token: "rt".to_string(),
            logged_in_at: Utc::now(),
        };

        let refreshed = session.with_access_token("new".to_string());
        assert_eq!(refreshed.access_token, "new");
        assert_eq!(refreshed.user_id, session.user_id);
        assert_eq!(refreshed.refresh_token, session.refresh_token);
    }
}
