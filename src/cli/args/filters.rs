//! Filter argument types for list commands
//!
//! Each family's flags mirror its API filter params; the conversion
//! methods produce the model filter that doubles as the cache-key
//! component.

use chrono::NaiveDate;
use clap::Args;

use crate::client::models::{
    CalendarEventFilter, ClientFilter, ProjectFilter, TaskFilter, TimeEntryFilter, UserFilter,
};

/// Client list filters
#[derive(Args, Debug, Default, Clone)]
pub struct ClientFilterArgs {
    /// Filter by name substring
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

impl ClientFilterArgs {
    pub fn to_filter(&self) -> ClientFilter {
        ClientFilter {
            search: self.search.clone(),
            is_active: self.active,
        }
    }
}

/// Project list filters
#[derive(Args, Debug, Default, Clone)]
pub struct ProjectFilterArgs {
    /// Filter by client id
    #[arg(long)]
    pub client: Option<i64>,

    /// Filter by project manager user id
    #[arg(long)]
    pub manager: Option<i64>,

    /// Filter by status id
    #[arg(long)]
    pub status: Option<i64>,

    /// Filter by active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,

    /// Filter by name substring
    #[arg(long)]
    pub search: Option<String>,
}

impl ProjectFilterArgs {
    pub fn to_filter(&self) -> ProjectFilter {
        ProjectFilter {
            client_id: self.client,
            project_manager_id: self.manager,
            status_id: self.status,
            is_active: self.active,
            search: self.search.clone(),
        }
    }
}

/// Task list filters
#[derive(Args, Debug, Default, Clone)]
pub struct TaskFilterArgs {
    /// Filter by project id
    #[arg(long)]
    pub project: Option<i64>,

    /// Filter by category id
    #[arg(long)]
    pub category: Option<i64>,

    /// Filter by priority id
    #[arg(long)]
    pub priority: Option<i64>,

    /// Filter by status id
    #[arg(long)]
    pub status: Option<i64>,

    /// Filter by assignee user id
    #[arg(long)]
    pub assignee: Option<i64>,

    /// Filter by parent task id
    #[arg(long)]
    pub parent: Option<i64>,

    /// Filter by active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,

    /// Filter by name substring
    #[arg(long)]
    pub search: Option<String>,

    /// Due on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_from: Option<NaiveDate>,

    /// Due on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_to: Option<NaiveDate>,
}

impl TaskFilterArgs {
    pub fn to_filter(&self) -> TaskFilter {
        TaskFilter {
            project_id: self.project,
            category_id: self.category,
            priority_id: self.priority,
            status_id: self.status,
            assigned_to: self.assignee,
            parent_task_id: self.parent,
            is_active: self.active,
            search: self.search.clone(),
            due_date_from: self.due_from,
            due_date_to: self.due_to,
        }
    }
}

/// Time entry list filters
#[derive(Args, Debug, Default, Clone)]
pub struct EntryFilterArgs {
    /// Filter by project id
    #[arg(long)]
    pub project: Option<i64>,

    /// Filter by task id
    #[arg(long)]
    pub task: Option<i64>,

    /// Filter by user id
    #[arg(long)]
    pub user: Option<i64>,

    /// Work date on or after (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Work date on or before (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Filter by description substring
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by billable flag (true/false)
    #[arg(long)]
    pub billable: Option<bool>,

    /// Filter by running flag (true/false)
    #[arg(long)]
    pub running: Option<bool>,
}

impl EntryFilterArgs {
    pub fn to_filter(&self) -> TimeEntryFilter {
        TimeEntryFilter {
            project_id: self.project,
            task_id: self.task,
            user_id: self.user,
            date_from: self.from,
            date_to: self.to,
            search: self.search.clone(),
            is_billable: self.billable,
            is_running: self.running,
        }
    }
}

/// Calendar event list filters
#[derive(Args, Debug, Default, Clone)]
pub struct CalendarFilterArgs {
    /// Filter by organizer
    #[arg(long)]
    pub organizer: Option<String>,

    /// Filter by location
    #[arg(long)]
    pub location: Option<String>,

    /// Events starting on or after (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Events starting on or before (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Filter by recurrence label (e.g. daily, weekly)
    #[arg(long)]
    pub recurring: Option<String>,

    /// Filter by active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,

    /// Filter by name substring
    #[arg(long)]
    pub search: Option<String>,
}

impl CalendarFilterArgs {
    pub fn to_filter(&self) -> CalendarEventFilter {
        CalendarEventFilter {
            organizer: self.organizer.clone(),
            location: self.location.clone(),
            start_date_from: self.from.map(|d| d.to_string()),
            start_date_to: self.to.map(|d| d.to_string()),
            recurring: self.recurring.clone(),
            is_active: self.active,
            search: self.search.clone(),
        }
    }
}

/// User list filters
#[derive(Args, Debug, Default, Clone)]
pub struct UserFilterArgs {
    /// Filter by name or email substring
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,

    /// Filter by role id
    #[arg(long)]
    pub role: Option<i64>,
}

impl UserFilterArgs {
    pub fn to_filter(&self) -> UserFilter {
        UserFilter {
            search: self.search.clone(),
            is_active: self.active,
            role_id: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_filter_args_to_filter() {
        let args = TaskFilterArgs {
            project: Some(3),
            assignee: Some(9),
            ..Default::default()
        };

        let filter = args.to_filter();
        assert_eq!(filter.project_id, Some(3));
        assert_eq!(filter.assigned_to, Some(9));
        assert_eq!(filter.status_id, None);
    }

    #[test]
    fn test_calendar_filter_dates_become_strings() {
        let args = CalendarFilterArgs {
            from: NaiveDate::from_ymd_opt(2025, 4, 1),
            ..Default::default()
        };

        let filter = args.to_filter();
        assert_eq!(filter.start_date_from.as_deref(), Some("2025-04-01"));
    }
}
