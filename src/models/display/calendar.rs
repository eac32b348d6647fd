//! Calendar event display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::CalendarEvent;
use crate::output::formatters::{format_active, opt_datetime_local, opt_str};

/// Calendar event row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CalendarEventDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "EVENT")]
    pub event_name: String,

    #[tabled(rename = "START")]
    pub start_time: String,

    #[tabled(rename = "END")]
    pub end_time: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "ORGANIZER")]
    pub organizer: String,

    #[tabled(rename = "RECURS")]
    pub recurring: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<CalendarEvent> for CalendarEventDisplay {
    fn from(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            event_name: event.event_name,
            start_time: opt_datetime_local(&event.start_time),
            end_time: opt_datetime_local(&event.end_time),
            location: opt_str(&event.location),
            organizer: opt_str(&event.organizer),
            recurring: opt_str(&event.recurring),
            status: format_active(event.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[test]
    fn test_event_display_from_event() {
        let display = CalendarEventDisplay::from(fixtures::calendar_event(2));

        assert_eq!(display.id, 2);
        assert_eq!(display.event_name, "Standup 2");
        assert_eq!(display.location, "Room 2");
        assert_eq!(display.recurring, "daily");
        assert_eq!(display.status, "active");
    }
}
