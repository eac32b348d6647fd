//! Calendar event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event, either created by hand or imported from a spreadsheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub event_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,

    /// Server-side dedup key computed from the event fields
    pub unique_hash: String,

    pub is_active: bool,
    pub created_by: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_user_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an event by hand
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarEventCreate {
    pub event_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarEventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Calendar event list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarEventFilter {
    pub organizer: Option<String>,
    pub location: Option<String>,
    pub start_date_from: Option<String>,
    pub start_date_to: Option<String>,
    pub recurring: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl CalendarEventFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref organizer) = self.organizer {
            pairs.push(("organizer", organizer.clone()));
        }
        if let Some(ref location) = self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(ref from) = self.start_date_from {
            pairs.push(("start_date_from", from.clone()));
        }
        if let Some(ref to) = self.start_date_to {
            pairs.push(("start_date_to", to.clone()));
        }
        if let Some(ref recurring) = self.recurring {
            pairs.push(("recurring", recurring.clone()));
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

/// Result of uploading a spreadsheet of events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarUploadReport {
    pub success: bool,
    pub total_records: usize,
    pub inserted_records: usize,
    pub duplicate_records: usize,
    pub invalid_records: usize,
    pub message: String,
}

/// Aggregate statistics over all events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarStats {
    pub total_events: usize,
    pub unique_events: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_event: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_event: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_hours: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_hours: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_report_deserialize() {
        let json = r#"{
            "success": true,
            "total_records": 40,
            "inserted_records": 35,
            "duplicate_records": 3,
            "invalid_records": 2,
            "message": "Processed 40 records"
        }"#;

        let report: CalendarUploadReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.inserted_records, 35);
        assert_eq!(
            report.total_records,
            report.inserted_records + report.duplicate_records + report.invalid_records
        );
    }

    #[test]
    fn test_calendar_filter_query_pairs() {
        let filter = CalendarEventFilter {
            organizer: Some("pm@example.com".to_string()),
            is_active: Some(true),
            ..Default::default()
        };

        let pairs = filter.query_pairs();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("organizer", "pm@example.com".to_string())));
    }
}
