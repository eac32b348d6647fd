//! Test fixtures for API model types
//!
//! Plain constructor functions with sensible defaults; tweak fields on
//! the returned value when a test needs something specific.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};

use super::models::{
    CalendarEvent, Client, ClientCreate, CurrentUser, Priority, Project, Task, TaskCategory,
    TaskCreate, TaskStatus, TimeEntry, TimeSummary, TimerStart, User,
};

fn fixed_timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn client(id: i64) -> Client {
    Client {
        id,
        name: format!("Client {}", id),
        email: Some(format!("client{}@example.com", id)),
        phone: None,
        address: None,
        country: Some("US".to_string()),
        timezone: "UTC".to_string(),
        is_active: true,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn client_create(name: &str) -> ClientCreate {
    ClientCreate {
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
        country: None,
        timezone: "UTC".to_string(),
        is_active: true,
    }
}

pub fn project(id: i64) -> Project {
    Project {
        id,
        name: format!("Project {}", id),
        description: None,
        client_id: 1,
        project_manager_id: 1,
        status_id: 1,
        start_date: Some(fixed_date()),
        end_date: None,
        estimated_hours: Some(120.0),
        budget: Some(10_000.0),
        currency: "USD".to_string(),
        is_active: true,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn task(id: i64) -> Task {
    Task {
        id,
        name: format!("Task {}", id),
        description: None,
        project_id: 1,
        parent_task_id: None,
        category_id: 1,
        priority_id: 2,
        status_id: 1,
        assigned_to: None,
        estimated_hours: Some(8.0),
        rate_per_hour: Some(75.0),
        currency: "USD".to_string(),
        due_date: None,
        is_active: true,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn task_create(project_id: i64) -> TaskCreate {
    TaskCreate {
        name: "New task".to_string(),
        description: None,
        project_id,
        parent_task_id: None,
        category_id: 1,
        priority_id: 2,
        status_id: 1,
        assigned_to: None,
        estimated_hours: None,
        rate_per_hour: None,
        currency: "USD".to_string(),
        due_date: None,
        is_active: true,
    }
}

pub fn task_category(id: i64, name: &str) -> TaskCategory {
    TaskCategory {
        id,
        name: name.to_string(),
        description: None,
        color: None,
        is_active: true,
    }
}

pub fn task_status(id: i64, name: &str, is_final: bool) -> TaskStatus {
    TaskStatus {
        id,
        name: name.to_string(),
        color: None,
        is_final,
        is_active: true,
    }
}

pub fn priority(id: i64, name: &str, level: i32) -> Priority {
    Priority {
        id,
        name: name.to_string(),
        level,
        color: None,
        is_active: true,
    }
}

/// A closed entry from 09:00 to 11:00
pub fn closed_entry(id: i64) -> TimeEntry {
    TimeEntry {
        id,
        user_id: 1,
        work_date: fixed_date(),
        project_id: 1,
        task_id: 1,
        description: Some("Implementation".to_string()),
        start_time: "09:00".to_string(),
        end_time: Some("11:00".to_string()),
        rate_per_hour: Some(75.0),
        currency: Some("USD".to_string()),
        comments: None,
        is_billable: Some(true),
        total_hours: Some(2.0),
        total_cost: Some(150.0),
        project_name: Some("Project 1".to_string()),
        task_name: Some("Task 1".to_string()),
        user_name: Some("Erin Moss".to_string()),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// A running entry that started at 09:00 and has no end yet
pub fn running_entry(id: i64) -> TimeEntry {
    TimeEntry {
        end_time: None,
        total_hours: None,
        total_cost: None,
        ..closed_entry(id)
    }
}

pub fn timer_start() -> TimerStart {
    TimerStart {
        project_id: 1,
        task_id: 1,
        description: "Work in progress".to_string(),
        start_time: "09:00".to_string(),
    }
}

pub fn time_summary() -> TimeSummary {
    TimeSummary {
        total_hours_today: 4.5,
        total_hours_week: 21.0,
        total_hours_month: 80.0,
        billable_hours_today: 4.0,
        billable_hours_week: 18.5,
        billable_hours_month: 71.0,
        active_timer: None,
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: format!("user{}", id),
        email: format!("user{}@example.com", id),
        first_name: "Erin".to_string(),
        last_name: "Moss".to_string(),
        full_name: "Erin Moss".to_string(),
        avatar_url: None,
        timezone: "UTC".to_string(),
        is_active: true,
        last_login: None,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn current_user() -> CurrentUser {
    CurrentUser {
        id: 1,
        username: "erin".to_string(),
        email: "erin@example.com".to_string(),
        first_name: "Erin".to_string(),
        last_name: "Moss".to_string(),
        full_name: "Erin Moss".to_string(),
        avatar_url: None,
        timezone: "UTC".to_string(),
        is_active: true,
        last_login: None,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn calendar_event(id: i64) -> CalendarEvent {
    CalendarEvent {
        id,
        event_name: format!("Standup {}", id),
        start_time: Some(fixed_timestamp()),
        end_time: Some(fixed_timestamp() + chrono::Duration::minutes(30)),
        location: Some("Room 2".to_string()),
        organizer: Some("pm@example.com".to_string()),
        attendees: None,
        recurring: Some("daily".to_string()),
        meeting_link: None,
        description: None,
        duration_minutes: Some(30.0),
        duration_hours: Some(0.5),
        unique_hash: format!("hash-{}", id),
        is_active: true,
        created_by: 1,
        created_by_user_name: Some("Erin Moss".to_string()),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}
