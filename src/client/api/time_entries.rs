//! Time entry CRUD and timer operations

use async_trait::async_trait;

use crate::client::models::{
    TimeEntry, TimeEntryCreate, TimeEntryFilter, TimeEntryUpdate, TimeSummary, TimerStart,
    TimerStop,
};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Time entry and timer operations
#[async_trait]
pub trait TimeEntryApi: Send + Sync {
    /// List time entries with pagination and filters.
    async fn list_time_entries(
        &self,
        pagination: &PaginationParams,
        filter: &TimeEntryFilter,
    ) -> Result<Page<TimeEntry>>;

    /// Get a single time entry by id.
    async fn get_time_entry(&self, id: i64) -> Result<TimeEntry>;

    /// Create a closed time entry directly.
    async fn create_time_entry(&self, payload: TimeEntryCreate) -> Result<TimeEntry>;

    /// Update a time entry.
    async fn update_time_entry(&self, id: i64, payload: TimeEntryUpdate) -> Result<TimeEntry>;

    /// Soft-delete a time entry.
    async fn delete_time_entry(&self, id: i64) -> Result<()>;

    /// Start the user's timer.
    ///
    /// The server assigns the authoritative start timestamp and rejects
    /// the call with a conflict when a timer is already running.
    async fn start_timer(&self, payload: TimerStart) -> Result<TimeEntry>;

    /// Stop the running timer; the server computes duration and cost.
    async fn stop_timer(&self, payload: TimerStop) -> Result<TimeEntry>;

    /// The user's running entry, if any.
    ///
    /// Cached under a dedicated key in the time-entries family, seeded
    /// directly by [`start_timer`](Self::start_timer) and cleared by
    /// [`stop_timer`](Self::stop_timer) so it stays consistent with the
    /// mutations without a round-trip.
    async fn active_timer(&self) -> Result<Option<TimeEntry>>;

    /// Aggregate hours for the signed-in user.
    async fn time_summary(&self) -> Result<TimeSummary>;
}
