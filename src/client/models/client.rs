//! Client (customer) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A client the platform bills projects to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub timezone: String,

    /// Soft-delete flag; DELETE marks this false server-side
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a client (server assigns id and timestamps)
#[derive(Debug, Clone, Serialize)]
pub struct ClientCreate {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub timezone: String,
    pub is_active: bool,
}

/// Partial update payload; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Client list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl ClientFilter {
    /// Query pairs, also used as the filter component of the cache key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_filter_query_pairs() {
        let filter = ClientFilter {
            search: Some("acme".to_string()),
            is_active: Some(true),
        };

        let pairs = filter.query_pairs();
        assert!(pairs.contains(&("search", "acme".to_string())));
        assert!(pairs.contains(&("is_active", "true".to_string())));
    }

    #[test]
    fn test_client_filter_empty() {
        assert!(ClientFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_client_update_skips_unset_fields() {
        let update = ClientUpdate {
            name: Some("Acme Corp".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["name"], "Acme Corp");
        assert!(json.get("email").is_none());
        assert!(json.get("is_active").is_none());
    }
}
