//! Time entry display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::TimeEntry;
use crate::output::formatters::{format_cost, opt_hours, opt_str};

/// Time entry row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TimeEntryDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "DATE")]
    pub work_date: String,

    #[tabled(rename = "PROJECT")]
    pub project: String,

    #[tabled(rename = "TASK")]
    pub task: String,

    #[tabled(rename = "START")]
    pub start_time: String,

    #[tabled(rename = "END")]
    pub end_time: String,

    #[tabled(rename = "HOURS")]
    pub hours: String,

    #[tabled(rename = "COST")]
    pub cost: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<TimeEntry> for TimeEntryDisplay {
    fn from(entry: TimeEntry) -> Self {
        let status = if entry.end_time.is_none() {
            "running".to_string()
        } else {
            "completed".to_string()
        };

        let cost = entry
            .total_cost
            .map(|c| format_cost(c, entry.currency.as_deref()))
            .unwrap_or_else(|| "--".to_string());

        Self {
            id: entry.id,
            work_date: entry.work_date.to_string(),
            project: entry
                .project_name
                .unwrap_or_else(|| entry.project_id.to_string()),
            task: entry.task_name.unwrap_or_else(|| entry.task_id.to_string()),
            start_time: entry.start_time,
            end_time: opt_str(&entry.end_time),
            hours: opt_hours(&entry.total_hours),
            cost,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[test]
    fn test_closed_entry_display() {
        let display = TimeEntryDisplay::from(fixtures::closed_entry(4));

        assert_eq!(display.id, 4);
        assert_eq!(display.status, "completed");
        assert_eq!(display.hours, "2h 00m");
        assert_eq!(display.cost, "150.00 USD");
        assert_eq!(display.project, "Project 1");
    }

    #[test]
    fn test_running_entry_display() {
        let display = TimeEntryDisplay::from(fixtures::running_entry(4));

        assert_eq!(display.status, "running");
        assert_eq!(display.end_time, "--");
        assert_eq!(display.hours, "--");
    }

    #[test]
    fn test_entry_without_names_falls_back_to_ids() {
        let mut entry = fixtures::closed_entry(1);
        entry.project_name = None;
        entry.task_name = None;

        let display = TimeEntryDisplay::from(entry);
        assert_eq!(display.project, "1");
        assert_eq!(display.task, "1");
    }
}
