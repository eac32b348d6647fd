//! Calendar event CRUD, spreadsheet upload, and statistics

use async_trait::async_trait;

use crate::client::models::{
    CalendarEvent, CalendarEventCreate, CalendarEventFilter, CalendarEventUpdate, CalendarStats,
    CalendarUploadReport,
};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Calendar operations
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// List calendar events with pagination and filters.
    async fn list_calendar_events(
        &self,
        pagination: &PaginationParams,
        filter: &CalendarEventFilter,
    ) -> Result<Page<CalendarEvent>>;

    /// Get a single event by id.
    async fn get_calendar_event(&self, id: i64) -> Result<CalendarEvent>;

    /// Create an event by hand.
    async fn create_calendar_event(&self, payload: CalendarEventCreate) -> Result<CalendarEvent>;

    /// Update an event.
    async fn update_calendar_event(
        &self,
        id: i64,
        payload: CalendarEventUpdate,
    ) -> Result<CalendarEvent>;

    /// Soft-delete an event.
    async fn delete_calendar_event(&self, id: i64) -> Result<()>;

    /// Upload a spreadsheet of events.
    ///
    /// The server deduplicates rows by their content hash and reports
    /// inserted/duplicate/invalid counts. A successful upload mutates the
    /// calendar family, so cached views are invalidated.
    async fn upload_calendar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<CalendarUploadReport>;

    /// Aggregate statistics over all events.
    async fn calendar_stats(&self) -> Result<CalendarStats>;
}
