//! Display models for CLI output
//!
//! Converts API response types into table/JSON-friendly rows.

pub mod display;

pub use display::{
    CalendarEventDisplay, ClientDisplay, LookupDisplay, ProjectDisplay, TaskDisplay,
    TimeEntryDisplay, UserDisplay,
};
