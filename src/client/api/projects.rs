//! Project CRUD operations

use async_trait::async_trait;

use crate::client::models::{Project, ProjectCreate, ProjectFilter, ProjectUpdate};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Project management operations
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// List projects with pagination and filters.
    async fn list_projects(
        &self,
        pagination: &PaginationParams,
        filter: &ProjectFilter,
    ) -> Result<Page<Project>>;

    /// Get a single project by id.
    async fn get_project(&self, id: i64) -> Result<Project>;

    /// Create a project.
    async fn create_project(&self, payload: ProjectCreate) -> Result<Project>;

    /// Update a project.
    async fn update_project(&self, id: i64, payload: ProjectUpdate) -> Result<Project>;

    /// Soft-delete a project.
    async fn delete_project(&self, id: i64) -> Result<()>;
}
