//! Display model definitions per resource family

mod calendar;
mod client;
mod lookup;
mod project;
mod task;
mod time_entry;
mod user;

pub use calendar::CalendarEventDisplay;
pub use client::ClientDisplay;
pub use lookup::LookupDisplay;
pub use project::ProjectDisplay;
pub use task::TaskDisplay;
pub use time_entry::TimeEntryDisplay;
pub use user::UserDisplay;
