//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials sent to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token
    pub access_token: String,

    /// Long-lived token used to mint new access tokens
    pub refresh_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Body of the refresh endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Profile of the signed-in user, from `GET /auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    pub timezone: String,
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_deserialize() {
        let json = r#"{
            "access_token": "aaa.bbb.ccc",
            "refresh_token": "ddd.eee.fff",
            "token_type": "bearer"
        }"#;

        let pair: TokenPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.access_token, "aaa.bbb.ccc");
        assert_eq!(pair.token_type, "bearer");
    }

    #[test]
    fn test_login_request_serializes_both_fields() {
        let req = LoginRequest {
            username: "erin".to_string(),
            password: "hunter2".to_string(),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["username"], "erin");
        assert_eq!(json["password"], "hunter2");
    }
}
