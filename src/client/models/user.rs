//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
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

/// User list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub role_id: Option<i64>,
}

impl UserFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        if let Some(id) = self.role_id {
            pairs.push(("role_id", id.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize() {
        let json = r#"{
            "id": 9,
            "username": "erin",
            "email": "erin@example.com",
            "first_name": "Erin",
            "last_name": "Moss",
            "full_name": "Erin Moss",
            "timezone": "UTC",
            "is_active": true,
            "created_at": "2024-11-02T12:00:00Z",
            "updated_at": "2025-01-05T08:30:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "Erin Moss");
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_user_filter_query_pairs() {
        let filter = UserFilter {
            role_id: Some(2),
            ..Default::default()
        };

        assert_eq!(filter.query_pairs(), vec![("role_id", "2".to_string())]);
    }
}
