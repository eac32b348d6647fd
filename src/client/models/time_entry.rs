//! Time entry and timer models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked block of work against a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,

    pub work_date: NaiveDate,
    pub project_id: i64,
    pub task_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start of the entry, HH:MM wall-clock time
    pub start_time: String,

    /// End of the entry; None while the timer is still running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,

    /// Server-computed duration, set once the entry is closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,

    /// Server-computed cost (total_hours * rate)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Parse the HH:MM (or HH:MM:SS) start time.
    pub fn start_time_of_day(&self) -> Option<NaiveTime> {
        parse_wall_time(&self.start_time)
    }

    /// Seconds elapsed since the entry started, relative to `now`.
    ///
    /// Recomputed from the start timestamp on every call rather than kept
    /// as a running counter, so the value stays correct across process
    /// suspension. Returns 0 when start_time does not parse or lies in
    /// the future (clock skew).
    pub fn elapsed_seconds(&self, now: NaiveTime) -> i64 {
        match self.start_time_of_day() {
            Some(start) => (now - start).num_seconds().max(0),
            None => 0,
        }
    }
}

/// Parse "HH:MM" or "HH:MM:SS"
pub fn parse_wall_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Payload for creating a closed time entry directly
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryCreate {
    pub work_date: NaiveDate,
    pub project_id: i64,
    pub task_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub start_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_hour: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
}

/// Time entry list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryFilter {
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub user_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
    pub is_billable: Option<bool>,
    pub is_running: Option<bool>,
}

impl TimeEntryFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.project_id {
            pairs.push(("project_id", id.to_string()));
        }
        if let Some(id) = self.task_id {
            pairs.push(("task_id", id.to_string()));
        }
        if let Some(id) = self.user_id {
            pairs.push(("user_id", id.to_string()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("date_from", from.to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to", to.to_string()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(billable) = self.is_billable {
            pairs.push(("is_billable", billable.to_string()));
        }
        if let Some(running) = self.is_running {
            pairs.push(("is_running", running.to_string()));
        }
        pairs
    }
}

/// Body of `POST /time-entries/start-timer`
#[derive(Debug, Clone, Serialize)]
pub struct TimerStart {
    pub project_id: i64,
    pub task_id: i64,
    pub description: String,

    /// HH:MM wall-clock start time
    pub start_time: String,
}

/// Body of `POST /time-entries/stop-timer`
#[derive(Debug, Clone, Serialize)]
pub struct TimerStop {
    /// HH:MM wall-clock end time
    pub end_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Aggregate hours for the signed-in user, from `GET /time-entries/summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSummary {
    pub total_hours_today: f64,
    pub total_hours_week: f64,
    pub total_hours_month: f64,

    pub billable_hours_today: f64,
    pub billable_hours_week: f64,
    pub billable_hours_month: f64,

    /// The running entry, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_timer: Option<TimeEntry>,
}
