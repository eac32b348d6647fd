//! Mock Traq API client for testing
//!
//! In-memory implementation of the API traits. CRUD operations mutate the
//! stored collections so round-trip tests observe realistic behavior, and
//! every call is counted for cache-layer assertions.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::api::{AuthApi, CalendarApi, ClientApi, ProjectApi, TaskApi, TimeEntryApi, UserApi};
use super::models::{
    parse_wall_time, CalendarEvent, CalendarEventCreate, CalendarEventFilter, CalendarEventUpdate,
    CalendarStats, CalendarUploadReport, Client as ClientModel, ClientCreate, ClientFilter,
    ClientUpdate, CurrentUser, Priority, Project, ProjectCreate, ProjectFilter, ProjectUpdate,
    Task, TaskCategory, TaskCreate, TaskFilter, TaskStatus, TaskUpdate, TimeEntry,
    TimeEntryCreate, TimeEntryFilter, TimeEntryUpdate, TimeSummary, TimerStart, TimerStop,
    TokenPair, User, UserFilter,
};
use super::pagination::{Page, PaginationParams, DEFAULT_PAGE_SIZE};
use crate::client::fixtures;
use crate::error::{ApiError, Result};

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub refresh: usize,
    pub me: usize,
    pub logout: usize,

    pub list_clients: usize,
    pub get_client: usize,
    pub create_client: usize,
    pub update_client: usize,
    pub delete_client: usize,

    pub list_projects: usize,
    pub get_project: usize,
    pub create_project: usize,
    pub update_project: usize,
    pub delete_project: usize,

    pub list_tasks: usize,
    pub get_task: usize,
    pub create_task: usize,
    pub update_task: usize,
    pub delete_task: usize,
    pub assign_task: usize,
    pub set_task_status: usize,
    pub list_task_categories: usize,
    pub list_task_statuses: usize,
    pub list_priorities: usize,

    pub list_time_entries: usize,
    pub get_time_entry: usize,
    pub create_time_entry: usize,
    pub update_time_entry: usize,
    pub delete_time_entry: usize,
    pub start_timer: usize,
    pub stop_timer: usize,
    pub active_timer: usize,
    pub time_summary: usize,

    pub list_users: usize,
    pub get_user: usize,

    pub list_calendar_events: usize,
    pub get_calendar_event: usize,
    pub create_calendar_event: usize,
    pub update_calendar_event: usize,
    pub delete_calendar_event: usize,
    pub upload_calendar: usize,
    pub calendar_stats: usize,
}

#[derive(Default)]
struct MockState {
    clients: Vec<ClientModel>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    entries: Vec<TimeEntry>,
    users: Vec<User>,
    events: Vec<CalendarEvent>,

    categories: Vec<TaskCategory>,
    statuses: Vec<TaskStatus>,
    priorities: Vec<Priority>,

    active: Option<TimeEntry>,
    summary: Option<TimeSummary>,
    upload_report: Option<CalendarUploadReport>,

    /// Error returned by the next call, consumed on use
    error: Option<ApiError>,

    /// Artificial latency applied to every call
    delay: Option<Duration>,

    counts: CallCounts,
}

/// Mock API client for testing.
///
/// Seed collections with `seed_*`, then exercise the wrapped client and
/// assert on `call_counts()`.
pub struct MockTraqClient {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockTraqClient {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }
}

impl MockTraqClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_clients(&self, clients: Vec<ClientModel>) {
        self.state.lock().await.clients = clients;
    }

    pub async fn seed_projects(&self, projects: Vec<Project>) {
        self.state.lock().await.projects = projects;
    }

    pub async fn seed_tasks(&self, tasks: Vec<Task>) {
        self.state.lock().await.tasks = tasks;
    }

    pub async fn seed_time_entries(&self, entries: Vec<TimeEntry>) {
        self.state.lock().await.entries = entries;
    }

    pub async fn seed_users(&self, users: Vec<User>) {
        self.state.lock().await.users = users;
    }

    pub async fn seed_calendar_events(&self, events: Vec<CalendarEvent>) {
        self.state.lock().await.events = events;
    }

    pub async fn seed_lookups(
        &self,
        categories: Vec<TaskCategory>,
        statuses: Vec<TaskStatus>,
        priorities: Vec<Priority>,
    ) {
        let mut state = self.state.lock().await;
        state.categories = categories;
        state.statuses = statuses;
        state.priorities = priorities;
    }

    pub async fn seed_active_timer(&self, entry: Option<TimeEntry>) {
        self.state.lock().await.active = entry;
    }

    pub async fn seed_summary(&self, summary: TimeSummary) {
        self.state.lock().await.summary = Some(summary);
    }

    pub async fn seed_upload_report(&self, report: CalendarUploadReport) {
        self.state.lock().await.upload_report = Some(report);
    }

    /// Fail the next call with `err`
    pub async fn fail_next(&self, err: ApiError) {
        self.state.lock().await.error = Some(err);
    }

    /// Add artificial latency to every call
    pub async fn set_response_delay(&self, delay: Duration) {
        self.state.lock().await.delay = Some(delay);
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.state.lock().await.counts.clone()
    }

    /// Consume a pending injected error and apply latency
    async fn begin_call(&self) -> Result<()> {
        let (delay, error) = {
            let mut state = self.state.lock().await;
            (state.delay, state.error.take())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn page_of<T: Clone>(items: Vec<T>, pagination: &PaginationParams) -> Page<T> {
        Page::paginate(
            items,
            pagination.page.unwrap_or(1),
            pagination.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
        items.iter().map(&id_of).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl AuthApi for MockTraqClient {
    async fn login(&self, _username: &str, _password: &str) -> Result<TokenPair> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.login += 1;
        Ok(TokenPair {
            access_token: "mock-access".to_string(),
            refresh_token: "mock-refresh".to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.refresh += 1;
        Ok(TokenPair {
            access_token: "mock-access-2".to_string(),
            refresh_token: "mock-refresh-2".to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn me(&self) -> Result<CurrentUser> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.me += 1;
        Ok(fixtures::current_user())
    }

    async fn logout(&self) -> Result<()> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.logout += 1;
        Ok(())
    }
}

#[async_trait]
impl ClientApi for MockTraqClient {
    async fn list_clients(
        &self,
        pagination: &PaginationParams,
        filter: &ClientFilter,
    ) -> Result<Page<ClientModel>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_clients += 1;

        let items: Vec<_> = state
            .clients
            .iter()
            .filter(|c| filter.is_active.map_or(true, |a| c.is_active == a))
            .filter(|c| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |s| c.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();

        Ok(Self::page_of(items, pagination))
    }

    async fn get_client(&self, id: i64) -> Result<ClientModel> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.get_client += 1;

        state
            .clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Client {} not found", id)).into())
    }

    async fn create_client(&self, payload: ClientCreate) -> Result<ClientModel> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.create_client += 1;

        let now = Utc::now();
        let created = ClientModel {
            id: Self::next_id(&state.clients, |c| c.id),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            country: payload.country,
            timezone: payload.timezone,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        };
        state.clients.push(created.clone());
        Ok(created)
    }

    async fn update_client(&self, id: i64, payload: ClientUpdate) -> Result<ClientModel> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.update_client += 1;

        let client = state
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Client {} not found", id)))?;

        if let Some(name) = payload.name {
            client.name = name;
        }
        if let Some(email) = payload.email {
            client.email = Some(email);
        }
        if let Some(phone) = payload.phone {
            client.phone = Some(phone);
        }
        if let Some(address) = payload.address {
            client.address = Some(address);
        }
        if let Some(country) = payload.country {
            client.country = Some(country);
        }
        if let Some(timezone) = payload.timezone {
            client.timezone = timezone;
        }
        if let Some(active) = payload.is_active {
            client.is_active = active;
        }
        client.updated_at = Utc::now();

        Ok(client.clone())
    }

    async fn delete_client(&self, id: i64) -> Result<()> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.delete_client += 1;

        let before = state.clients.len();
        state.clients.retain(|c| c.id != id);
        if state.clients.len() == before {
            return Err(ApiError::NotFound(format!("Client {} not found", id)).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectApi for MockTraqClient {
    async fn list_projects(
        &self,
        pagination: &PaginationParams,
        filter: &ProjectFilter,
    ) -> Result<Page<Project>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_projects += 1;

        let items: Vec<_> = state
            .projects
            .iter()
            .filter(|p| filter.client_id.map_or(true, |id| p.client_id == id))
            .filter(|p| filter.status_id.map_or(true, |id| p.status_id == id))
            .filter(|p| filter.is_active.map_or(true, |a| p.is_active == a))
            .cloned()
            .collect();

        Ok(Self::page_of(items, pagination))
    }

    async fn get_project(&self, id: i64) -> Result<Project> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.get_project += 1;

        state
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", id)).into())
    }

    async fn create_project(&self, payload: ProjectCreate) -> Result<Project> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.create_project += 1;

        let now = Utc::now();
        let created = Project {
            id: Self::next_id(&state.projects, |p| p.id),
            name: payload.name,
            description: payload.description,
            client_id: payload.client_id,
            project_manager_id: payload.project_manager_id,
            status_id: payload.status_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            estimated_hours: payload.estimated_hours,
            budget: payload.budget,
            currency: payload.currency,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        };
        state.projects.push(created.clone());
        Ok(created)
    }

    async fn update_project(&self, id: i64, payload: ProjectUpdate) -> Result<Project> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.update_project += 1;

        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Project {} not found", id)))?;

        if let Some(name) = payload.name {
            project.name = name;
        }
        if let Some(description) = payload.description {
            project.description = Some(description);
        }
        if let Some(manager) = payload.project_manager_id {
            project.project_manager_id = manager;
        }
        if let Some(status) = payload.status_id {
            project.status_id = status;
        }
        if let Some(start) = payload.start_date {
            project.start_date = Some(start);
        }
        if let Some(end) = payload.end_date {
            project.end_date = Some(end);
        }
        if let Some(hours) = payload.estimated_hours {
            project.estimated_hours = Some(hours);
        }
        if let Some(budget) = payload.budget {
            project.budget = Some(budget);
        }
        if let Some(currency) = payload.currency {
            project.currency = currency;
        }
        if let Some(active) = payload.is_active {
            project.is_active = active;
        }
        project.updated_at = Utc::now();

        Ok(project.clone())
    }

    async fn delete_project(&self, id: i64) -> Result<()> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.delete_project += 1;

        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            return Err(ApiError::NotFound(format!("Project {} not found", id)).into());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskApi for MockTraqClient {
    async fn list_tasks(
        &self,
        pagination: &PaginationParams,
        filter: &TaskFilter,
    ) -> Result<Page<Task>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_tasks += 1;

        let items: Vec<_> = state
            .tasks
            .iter()
            .filter(|t| filter.project_id.map_or(true, |id| t.project_id == id))
            .filter(|t| filter.status_id.map_or(true, |id| t.status_id == id))
            .filter(|t| filter.assigned_to.map_or(true, |id| t.assigned_to == Some(id)))
            .filter(|t| filter.is_active.map_or(true, |a| t.is_active == a))
            .cloned()
            .collect();

        Ok(Self::page_of(items, pagination))
    }

    async fn get_task(&self, id: i64) -> Result<Task> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.get_task += 1;

        state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)).into())
    }

    async fn create_task(&self, payload: TaskCreate) -> Result<Task> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.create_task += 1;

        let now = Utc::now();
        let created = Task {
            id: Self::next_id(&state.tasks, |t| t.id),
            name: payload.name,
            description: payload.description,
            project_id: payload.project_id,
            parent_task_id: payload.parent_task_id,
            category_id: payload.category_id,
            priority_id: payload.priority_id,
            status_id: payload.status_id,
            assigned_to: payload.assigned_to,
            estimated_hours: payload.estimated_hours,
            rate_per_hour: payload.rate_per_hour,
            currency: payload.currency,
            due_date: payload.due_date,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        };
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: i64, payload: TaskUpdate) -> Result<Task> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.update_task += 1;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

        if let Some(name) = payload.name {
            task.name = name;
        }
        if let Some(description) = payload.description {
            task.description = Some(description);
        }
        if let Some(category) = payload.category_id {
            task.category_id = category;
        }
        if let Some(priority) = payload.priority_id {
            task.priority_id = priority;
        }
        if let Some(status) = payload.status_id {
            task.status_id = status;
        }
        if let Some(assignee) = payload.assigned_to {
            task.assigned_to = Some(assignee);
        }
        if let Some(hours) = payload.estimated_hours {
            task.estimated_hours = Some(hours);
        }
        if let Some(rate) = payload.rate_per_hour {
            task.rate_per_hour = Some(rate);
        }
        if let Some(currency) = payload.currency {
            task.currency = currency;
        }
        if let Some(due) = payload.due_date {
            task.due_date = Some(due);
        }
        if let Some(active) = payload.is_active {
            task.is_active = active;
        }
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.delete_task += 1;

        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(ApiError::NotFound(format!("Task {} not found", id)).into());
        }
        Ok(())
    }

    async fn assign_task(&self, id: i64, user_id: i64) -> Result<Task> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.assign_task += 1;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;
        task.assigned_to = Some(user_id);
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn set_task_status(&self, id: i64, status_id: i64) -> Result<Task> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.set_task_status += 1;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;
        task.status_id = status_id;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn list_task_categories(&self) -> Result<Vec<TaskCategory>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_task_categories += 1;
        Ok(state.categories.clone())
    }

    async fn list_task_statuses(&self) -> Result<Vec<TaskStatus>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_task_statuses += 1;
        Ok(state.statuses.clone())
    }

    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_priorities += 1;
        Ok(state.priorities.clone())
    }
}

#[async_trait]
impl TimeEntryApi for MockTraqClient {
    async fn list_time_entries(
        &self,
        pagination: &PaginationParams,
        filter: &TimeEntryFilter,
    ) -> Result<Page<TimeEntry>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_time_entries += 1;

        let items: Vec<_> = state
            .entries
            .iter()
            .filter(|e| filter.project_id.map_or(true, |id| e.project_id == id))
            .filter(|e| filter.task_id.map_or(true, |id| e.task_id == id))
            .filter(|e| filter.user_id.map_or(true, |id| e.user_id == id))
            .filter(|e| filter.date_from.map_or(true, |d| e.work_date >= d))
            .filter(|e| filter.date_to.map_or(true, |d| e.work_date <= d))
            .filter(|e| filter.is_billable.map_or(true, |b| e.is_billable == Some(b)))
            .cloned()
            .collect();

        Ok(Self::page_of(items, pagination))
    }

    async fn get_time_entry(&self, id: i64) -> Result<TimeEntry> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.get_time_entry += 1;

        state
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Time entry {} not found", id)).into())
    }

    async fn create_time_entry(&self, payload: TimeEntryCreate) -> Result<TimeEntry> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.create_time_entry += 1;

        let total_hours = match (
            parse_wall_time(&payload.start_time),
            payload.end_time.as_deref().and_then(parse_wall_time),
        ) {
            (Some(start), Some(end)) => Some((end - start).num_minutes() as f64 / 60.0),
            _ => None,
        };

        let now = Utc::now();
        let created = TimeEntry {
            id: Self::next_id(&state.entries, |e| e.id),
            user_id: 1,
            work_date: payload.work_date,
            project_id: payload.project_id,
            task_id: payload.task_id,
            description: payload.description,
            start_time: payload.start_time,
            end_time: payload.end_time,
            rate_per_hour: payload.rate_per_hour,
            currency: payload.currency,
            comments: payload.comments,
            is_billable: payload.is_billable,
            total_cost: total_hours
                .zip(payload.rate_per_hour)
                .map(|(h, r)| h * r),
            total_hours,
            project_name: None,
            task_name: None,
            user_name: None,
            created_at: now,
            updated_at: now,
        };
        state.entries.push(created.clone());
        Ok(created)
    }

    async fn update_time_entry(&self, id: i64, payload: TimeEntryUpdate) -> Result<TimeEntry> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.update_time_entry += 1;

        let entry = state
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Time entry {} not found", id)))?;

        if let Some(date) = payload.work_date {
            entry.work_date = date;
        }
        if let Some(project) = payload.project_id {
            entry.project_id = project;
        }
        if let Some(task) = payload.task_id {
            entry.task_id = task;
        }
        if let Some(description) = payload.description {
            entry.description = Some(description);
        }
        if let Some(start) = payload.start_time {
            entry.start_time = start;
        }
        if let Some(end) = payload.end_time {
            entry.end_time = Some(end);
        }
        if let Some(rate) = payload.rate_per_hour {
            entry.rate_per_hour = Some(rate);
        }
        if let Some(currency) = payload.currency {
            entry.currency = Some(currency);
        }
        if let Some(comments) = payload.comments {
            entry.comments = Some(comments);
        }
        if let Some(billable) = payload.is_billable {
            entry.is_billable = Some(billable);
        }
        entry.updated_at = Utc::now();

        Ok(entry.clone())
    }

    async fn delete_time_entry(&self, id: i64) -> Result<()> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.delete_time_entry += 1;

        let before = state.entries.len();
        state.entries.retain(|e| e.id != id);
        if state.entries.len() == before {
            return Err(ApiError::NotFound(format!("Time entry {} not found", id)).into());
        }
        Ok(())
    }

    /// One active timer per user, enforced like the real backend
    async fn start_timer(&self, payload: TimerStart) -> Result<TimeEntry> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.start_timer += 1;

        if state.active.is_some() {
            return Err(
                ApiError::Conflict("A timer is already running for this user".to_string()).into(),
            );
        }

        let now = Utc::now();
        let entry = TimeEntry {
            id: Self::next_id(&state.entries, |e| e.id),
            user_id: 1,
            work_date: now.date_naive(),
            project_id: payload.project_id,
            task_id: payload.task_id,
            description: Some(payload.description),
            start_time: payload.start_time,
            end_time: None,
            rate_per_hour: None,
            currency: None,
            comments: None,
            is_billable: Some(true),
            total_hours: None,
            total_cost: None,
            project_name: None,
            task_name: None,
            user_name: None,
            created_at: now,
            updated_at: now,
        };
        state.active = Some(entry.clone());
        Ok(entry)
    }

    async fn stop_timer(&self, payload: TimerStop) -> Result<TimeEntry> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.stop_timer += 1;

        let mut entry = state
            .active
            .take()
            .ok_or_else(|| ApiError::Conflict("No timer is running".to_string()))?;

        entry.end_time = Some(payload.end_time.clone());
        if let Some(description) = payload.description {
            entry.description = Some(description);
        }
        entry.total_hours = match (
            parse_wall_time(&entry.start_time),
            parse_wall_time(&payload.end_time),
        ) {
            (Some(start), Some(end)) => Some((end - start).num_minutes() as f64 / 60.0),
            _ => None,
        };
        entry.total_cost = entry
            .total_hours
            .zip(entry.rate_per_hour)
            .map(|(h, r)| h * r);
        entry.updated_at = Utc::now();

        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn active_timer(&self) -> Result<Option<TimeEntry>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.active_timer += 1;
        Ok(state.active.clone())
    }

    async fn time_summary(&self) -> Result<TimeSummary> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.time_summary += 1;

        let mut summary = state.summary.clone().unwrap_or_else(|| {
            let total: f64 = state.entries.iter().filter_map(|e| e.total_hours).sum();
            let billable: f64 = state
                .entries
                .iter()
                .filter(|e| e.is_billable == Some(true))
                .filter_map(|e| e.total_hours)
                .sum();
            TimeSummary {
                total_hours_today: total,
                total_hours_week: total,
                total_hours_month: total,
                billable_hours_today: billable,
                billable_hours_week: billable,
                billable_hours_month: billable,
                active_timer: None,
            }
        });
        summary.active_timer = state.active.clone();
        Ok(summary)
    }
}

#[async_trait]
impl UserApi for MockTraqClient {
    async fn list_users(
        &self,
        pagination: &PaginationParams,
        filter: &UserFilter,
    ) -> Result<Page<User>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_users += 1;

        let items: Vec<_> = state
            .users
            .iter()
            .filter(|u| filter.is_active.map_or(true, |a| u.is_active == a))
            .filter(|u| {
                filter.search.as_deref().map_or(true, |s| {
                    u.full_name.to_lowercase().contains(&s.to_lowercase())
                        || u.email.to_lowercase().contains(&s.to_lowercase())
                })
            })
            .cloned()
            .collect();

        Ok(Self::page_of(items, pagination))
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.get_user += 1;

        state
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)).into())
    }
}

#[async_trait]
impl CalendarApi for MockTraqClient {
    async fn list_calendar_events(
        &self,
        pagination: &PaginationParams,
        filter: &CalendarEventFilter,
    ) -> Result<Page<CalendarEvent>> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.list_calendar_events += 1;

        let items: Vec<_> = state
            .events
            .iter()
            .filter(|e| filter.is_active.map_or(true, |a| e.is_active == a))
            .filter(|e| {
                filter
                    .organizer
                    .as_deref()
                    .map_or(true, |o| e.organizer.as_deref() == Some(o))
            })
            .cloned()
            .collect();

        Ok(Self::page_of(items, pagination))
    }

    async fn get_calendar_event(&self, id: i64) -> Result<CalendarEvent> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.get_calendar_event += 1;

        state
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Calendar event {} not found", id)).into())
    }

    async fn create_calendar_event(&self, payload: CalendarEventCreate) -> Result<CalendarEvent> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.create_calendar_event += 1;

        let now = Utc::now();
        let id = Self::next_id(&state.events, |e| e.id);
        let created = CalendarEvent {
            id,
            event_name: payload.event_name,
            start_time: payload.start_time,
            end_time: payload.end_time,
            location: payload.location,
            organizer: payload.organizer,
            attendees: payload.attendees,
            recurring: payload.recurring,
            meeting_link: payload.meeting_link,
            description: payload.description,
            duration_minutes: None,
            duration_hours: None,
            unique_hash: format!("hash-{}", id),
            is_active: payload.is_active.unwrap_or(true),
            created_by: 1,
            created_by_user_name: None,
            created_at: now,
            updated_at: now,
        };
        state.events.push(created.clone());
        Ok(created)
    }

    async fn update_calendar_event(
        &self,
        id: i64,
        payload: CalendarEventUpdate,
    ) -> Result<CalendarEvent> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.update_calendar_event += 1;

        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Calendar event {} not found", id)))?;

        if let Some(name) = payload.event_name {
            event.event_name = name;
        }
        if let Some(start) = payload.start_time {
            event.start_time = Some(start);
        }
        if let Some(end) = payload.end_time {
            event.end_time = Some(end);
        }
        if let Some(location) = payload.location {
            event.location = Some(location);
        }
        if let Some(organizer) = payload.organizer {
            event.organizer = Some(organizer);
        }
        if let Some(active) = payload.is_active {
            event.is_active = active;
        }
        event.updated_at = Utc::now();

        Ok(event.clone())
    }

    async fn delete_calendar_event(&self, id: i64) -> Result<()> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.delete_calendar_event += 1;

        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        if state.events.len() == before {
            return Err(ApiError::NotFound(format!("Calendar event {} not found", id)).into());
        }
        Ok(())
    }

    async fn upload_calendar(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<CalendarUploadReport> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.upload_calendar += 1;

        Ok(state.upload_report.clone().unwrap_or(CalendarUploadReport {
            success: true,
            total_records: 0,
            inserted_records: 0,
            duplicate_records: 0,
            invalid_records: 0,
            message: "Processed 0 records".to_string(),
        }))
    }

    async fn calendar_stats(&self) -> Result<CalendarStats> {
        self.begin_call().await?;
        let mut state = self.state.lock().await;
        state.counts.calendar_stats += 1;

        Ok(CalendarStats {
            total_events: state.events.len(),
            unique_events: state.events.len(),
            earliest_event: state.events.iter().filter_map(|e| e.start_time).min(),
            latest_event: state.events.iter().filter_map(|e| e.start_time).max(),
            avg_duration_hours: None,
            total_duration_hours: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let mock = MockTraqClient::new();

        let created = mock
            .create_client(fixtures::client_create("Acme"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = mock.get_client(1).await.unwrap();
        assert_eq!(fetched.name, "Acme");

        mock.delete_client(1).await.unwrap();
        assert!(mock.get_client(1).await.is_err());
    }

    #[tokio::test]
    async fn test_start_while_running_conflicts() {
        let mock = MockTraqClient::new();

        mock.start_timer(fixtures::timer_start()).await.unwrap();
        let err = mock.start_timer(fixtures::timer_start()).await.unwrap_err();

        assert!(matches!(
            err,
            crate::error::Error::Api(ApiError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_stop_closes_entry_and_appends_to_list() {
        let mock = MockTraqClient::new();

        mock.start_timer(fixtures::timer_start()).await.unwrap();
        let closed = mock
            .stop_timer(TimerStop {
                end_time: "11:30".to_string(),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(closed.total_hours, Some(2.5));
        assert!(mock.active_timer().await.unwrap().is_none());

        let page = mock
            .list_time_entries(&PaginationParams::new(), &TimeEntryFilter::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_next_consumed_once() {
        let mock = MockTraqClient::new();
        mock.fail_next(ApiError::ServerError("boom".to_string())).await;

        assert!(mock.active_timer().await.is_err());
        assert!(mock.active_timer().await.is_ok());
    }
}
