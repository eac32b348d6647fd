//! Wire models for the Traq API
//!
//! Field names mirror the API's snake_case JSON. Server-assigned fields
//! (id, timestamps, computed totals) appear only on response types; create
//! and update payloads carry just the client-writable subset.

mod auth;
mod calendar;
mod client;
mod project;
mod task;
mod time_entry;
mod user;

pub use auth::{CurrentUser, LoginRequest, RefreshRequest, TokenPair};
pub use calendar::{
    CalendarEvent, CalendarEventCreate, CalendarEventFilter, CalendarEventUpdate, CalendarStats,
    CalendarUploadReport,
};
pub use client::{Client, ClientCreate, ClientFilter, ClientUpdate};
pub use project::{Project, ProjectCreate, ProjectFilter, ProjectUpdate};
pub use task::{
    Priority, Task, TaskAssign, TaskCategory, TaskCreate, TaskFilter, TaskStatus, TaskStatusChange,
    TaskUpdate,
};
pub use time_entry::{
    parse_wall_time, TimeEntry, TimeEntryCreate, TimeEntryFilter, TimeEntryUpdate, TimeSummary,
    TimerStart, TimerStop,
};
pub use user::{User, UserFilter};
