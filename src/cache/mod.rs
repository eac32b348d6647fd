//! Local cache for API responses
//!
//! SQLite-backed read-through cache keyed by (family, view, params)
//! digests. Mutations invalidate whole families; concurrent fetches of
//! the same key are coalesced into a single request.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

use crate::client::Family;

/// Cache TTL configuration per view
///
/// Freshness windows, not correctness guarantees: a mutation through this
/// process invalidates immediately, these only bound how long data from
/// other writers may go unseen.
pub struct CacheTtl;

impl CacheTtl {
    // Fast-moving collections
    pub const TASKS: Duration = Duration::from_secs(2 * 60); // 2 min
    pub const TIME_ENTRIES: Duration = Duration::from_secs(2 * 60); // 2 min

    // Slower-moving collections
    pub const CLIENTS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const PROJECTS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const USERS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const CALENDAR: Duration = Duration::from_secs(5 * 60); // 5 min

    // Detail views follow their family's list TTL via for_family()

    // Lookup collections barely change
    pub const LOOKUPS: Duration = Duration::from_secs(60 * 60); // 1 hr

    // Derived time-tracking views
    pub const SUMMARY: Duration = Duration::from_secs(60); // 1 min
    pub const ACTIVE_TIMER: Duration = Duration::from_secs(30); // 30 sec
    pub const CALENDAR_STATS: Duration = Duration::from_secs(10 * 60); // 10 min

    /// TTL for a family's list and detail entries
    pub fn for_family(family: Family) -> Duration {
        match family {
            Family::Clients => Self::CLIENTS,
            Family::Projects => Self::PROJECTS,
            Family::Tasks => Self::TASKS,
            Family::TimeEntries => Self::TIME_ENTRIES,
            Family::Users => Self::USERS,
            Family::Calendar => Self::CALENDAR,
        }
    }
}

// Re-export main types
pub use client::CachedTraqClient;
pub use key::{cache_key, entity_key};
pub use storage::CacheStorage;
