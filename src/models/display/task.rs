//! Task display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Task;
use crate::output::formatters::{format_active, opt_date, opt_hours};

/// Task row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TaskDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PROJECT")]
    pub project_id: i64,

    #[tabled(rename = "STATUS")]
    pub status_id: i64,

    #[tabled(rename = "PRIORITY")]
    pub priority_id: i64,

    #[tabled(rename = "ASSIGNEE")]
    pub assignee: String,

    #[tabled(rename = "ESTIMATE")]
    pub estimated_hours: String,

    #[tabled(rename = "DUE")]
    pub due_date: String,

    #[tabled(rename = "ACTIVE")]
    pub active: String,
}

impl From<Task> for TaskDisplay {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            project_id: task.project_id,
            status_id: task.status_id,
            priority_id: task.priority_id,
            assignee: task
                .assigned_to
                .map(|id| id.to_string())
                .unwrap_or_else(|| "--".to_string()),
            estimated_hours: opt_hours(&task.estimated_hours),
            due_date: opt_date(&task.due_date),
            active: format_active(task.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[test]
    fn test_task_display_from_task() {
        let display = TaskDisplay::from(fixtures::task(11));

        assert_eq!(display.id, 11);
        assert_eq!(display.assignee, "--");
        assert_eq!(display.estimated_hours, "8h 00m");
        assert_eq!(display.due_date, "--");
    }

    #[test]
    fn test_task_display_with_assignee() {
        let mut task = fixtures::task(1);
        task.assigned_to = Some(9);

        let display = TaskDisplay::from(task);
        assert_eq!(display.assignee, "9");
    }
}
