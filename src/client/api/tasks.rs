//! Task CRUD and workflow operations

use async_trait::async_trait;

use crate::client::models::{
    Priority, Task, TaskCategory, TaskCreate, TaskFilter, TaskStatus, TaskUpdate,
};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Task management operations
///
/// Assignment and status transitions are separate endpoints server-side
/// but behave like any other update: they mutate the tasks family and
/// invalidate its cached views.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// List tasks with pagination and filters.
    async fn list_tasks(
        &self,
        pagination: &PaginationParams,
        filter: &TaskFilter,
    ) -> Result<Page<Task>>;

    /// Get a single task by id.
    async fn get_task(&self, id: i64) -> Result<Task>;

    /// Create a task.
    async fn create_task(&self, payload: TaskCreate) -> Result<Task>;

    /// Update a task.
    async fn update_task(&self, id: i64, payload: TaskUpdate) -> Result<Task>;

    /// Soft-delete a task.
    async fn delete_task(&self, id: i64) -> Result<()>;

    /// Assign a task to a user.
    async fn assign_task(&self, id: i64, user_id: i64) -> Result<Task>;

    /// Move a task to a new status.
    async fn set_task_status(&self, id: i64, status_id: i64) -> Result<Task>;

    /// List task categories (stable lookup data, cached long).
    async fn list_task_categories(&self) -> Result<Vec<TaskCategory>>;

    /// List task statuses.
    async fn list_task_statuses(&self) -> Result<Vec<TaskStatus>>;

    /// List priorities.
    async fn list_priorities(&self) -> Result<Vec<Priority>>;
}
