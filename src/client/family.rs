//! Resource families
//!
//! Every cached query and every invalidation is scoped by the resource
//! family it belongs to. A family groups one set of CRUD endpoints and all
//! of the list/detail cache entries derived from them.

use std::fmt;

/// A named category of entity sharing one set of CRUD endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Clients,
    Projects,
    Tasks,
    TimeEntries,
    Users,
    Calendar,
}

impl Family {
    /// Stable tag used in cache keys and family-wide invalidation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Clients => "clients",
            Family::Projects => "projects",
            Family::Tasks => "tasks",
            Family::TimeEntries => "time-entries",
            Family::Users => "users",
            Family::Calendar => "calendar",
        }
    }

    /// URL path segment for the family's CRUD endpoints.
    pub fn path(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
