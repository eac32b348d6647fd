//! Task models and lookup collections

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task within a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub project_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<i64>,

    pub category_id: i64,
    pub priority_id: i64,
    pub status_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,

    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreate {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub project_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<i64>,

    pub category_id: i64,
    pub priority_id: i64,
    pub status_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,

    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub is_active: bool,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Task list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub project_id: Option<i64>,
    pub category_id: Option<i64>,
    pub priority_id: Option<i64>,
    pub status_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub parent_task_id: Option<i64>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub due_date_from: Option<NaiveDate>,
    pub due_date_to: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.project_id {
            pairs.push(("project_id", id.to_string()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(id) = self.priority_id {
            pairs.push(("priority_id", id.to_string()));
        }
        if let Some(id) = self.status_id {
            pairs.push(("status_id", id.to_string()));
        }
        if let Some(id) = self.assigned_to {
            pairs.push(("assigned_to", id.to_string()));
        }
        if let Some(id) = self.parent_task_id {
            pairs.push(("parent_task_id", id.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(from) = self.due_date_from {
            pairs.push(("due_date_from", from.to_string()));
        }
        if let Some(to) = self.due_date_to {
            pairs.push(("due_date_to", to.to_string()));
        }
        pairs
    }
}

/// Task category lookup entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCategory {
    pub id: i64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub is_active: bool,
}

/// Task status lookup entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: i64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Whether the status terminates a task (e.g. Done, Cancelled)
    pub is_final: bool,

    pub is_active: bool,
}

/// Priority lookup entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    pub id: i64,
    pub name: String,
    pub level: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub is_active: bool,
}

/// Body of `PUT /tasks/{id}/assign`
#[derive(Debug, Clone, Serialize)]
pub struct TaskAssign {
    pub assigned_to: i64,
}

/// Body of `PUT /tasks/{id}/status`
#[derive(Debug, Clone, Serialize)]
pub struct TaskStatusChange {
    pub status_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_filter_query_pairs() {
        let filter = TaskFilter {
            project_id: Some(3),
            assigned_to: Some(9),
            is_active: Some(true),
            due_date_to: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..Default::default()
        };

        let pairs = filter.query_pairs();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("project_id", "3".to_string())));
        assert!(pairs.contains(&("due_date_to", "2025-06-30".to_string())));
    }

    #[test]
    fn test_filters_differing_only_in_one_field_are_unequal() {
        let a = TaskFilter {
            project_id: Some(3),
            ..Default::default()
        };
        let b = TaskFilter {
            project_id: Some(4),
            ..Default::default()
        };
        assert_ne!(a, b);
        assert_ne!(a.query_pairs(), b.query_pairs());
    }

    #[test]
    fn test_task_status_is_final() {
        let json = r#"{"id": 5, "name": "Done", "is_final": true, "is_active": true}"#;
        let status: TaskStatus = serde_json::from_str(json).unwrap();
        assert!(status.is_final);
        assert!(status.color.is_none());
    }
}
