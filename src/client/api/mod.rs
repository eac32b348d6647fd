//! API trait definitions split by resource family
//!
//! Each family gets a focused trait; the [`TraqApi`](super::TraqApi)
//! super-trait combines them so callers can hold one object for the whole
//! surface while tests implement only what they need.

mod auth;
mod calendar;
mod clients;
mod projects;
mod tasks;
mod time_entries;
mod users;

pub use auth::AuthApi;
pub use calendar::CalendarApi;
pub use clients::ClientApi;
pub use projects::ProjectApi;
pub use tasks::TaskApi;
pub use time_entries::TimeEntryApi;
pub use users::UserApi;
