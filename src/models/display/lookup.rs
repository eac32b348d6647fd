//! Display model for task lookup collections

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Priority, TaskCategory, TaskStatus};
use crate::output::formatters::format_active;

/// Shared row shape for categories, statuses, and priorities.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LookupDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DETAIL")]
    pub detail: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<TaskCategory> for LookupDisplay {
    fn from(category: TaskCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            detail: category.description.unwrap_or_else(|| "--".to_string()),
            status: format_active(category.is_active),
        }
    }
}

impl From<TaskStatus> for LookupDisplay {
    fn from(status: TaskStatus) -> Self {
        Self {
            id: status.id,
            name: status.name,
            detail: if status.is_final { "final" } else { "open" }.to_string(),
            status: format_active(status.is_active),
        }
    }
}

impl From<Priority> for LookupDisplay {
    fn from(priority: Priority) -> Self {
        Self {
            id: priority.id,
            name: priority.name,
            detail: format!("level {}", priority.level),
            status: format_active(priority.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[test]
    fn test_lookup_display_from_status() {
        let display = LookupDisplay::from(fixtures::task_status(5, "Done", true));
        assert_eq!(display.detail, "final");
    }

    #[test]
    fn test_lookup_display_from_priority() {
        let display = LookupDisplay::from(fixtures::priority(2, "High", 3));
        assert_eq!(display.detail, "level 3");
    }
}
