//! Project models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A project belonging to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub client_id: i64,
    pub project_manager_id: i64,
    pub status_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    pub currency: String,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a project
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreate {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub client_id: i64,
    pub project_manager_id: i64,
    pub status_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    pub currency: String,
    pub is_active: bool,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_manager_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Project list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub client_id: Option<i64>,
    pub project_manager_id: Option<i64>,
    pub status_id: Option<i64>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.client_id {
            pairs.push(("client_id", id.to_string()));
        }
        if let Some(id) = self.project_manager_id {
            pairs.push(("project_manager_id", id.to_string()));
        }
        if let Some(id) = self.status_id {
            pairs.push(("status_id", id.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_filter_query_pairs() {
        let filter = ProjectFilter {
            client_id: Some(7),
            status_id: Some(2),
            ..Default::default()
        };

        let pairs = filter.query_pairs();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("client_id", "7".to_string())));
        assert!(pairs.contains(&("status_id", "2".to_string())));
    }

    #[test]
    fn test_project_deserialize() {
        let json = r#"{
            "id": 3,
            "name": "Website Redesign",
            "client_id": 7,
            "project_manager_id": 1,
            "status_id": 2,
            "start_date": "2025-01-15",
            "currency": "USD",
            "is_active": true,
            "created_at": "2025-01-10T09:00:00Z",
            "updated_at": "2025-01-10T09:00:00Z"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "Website Redesign");
        assert_eq!(
            project.start_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
        assert!(project.budget.is_none());
    }
}
