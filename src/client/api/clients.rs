//! Client (customer) CRUD operations

use async_trait::async_trait;

use crate::client::models::{Client, ClientCreate, ClientFilter, ClientUpdate};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Client management operations
#[async_trait]
pub trait ClientApi: Send + Sync {
    /// List clients with pagination and filters.
    ///
    /// May return cached data; the cache key covers pagination and every
    /// filter field.
    async fn list_clients(
        &self,
        pagination: &PaginationParams,
        filter: &ClientFilter,
    ) -> Result<Page<Client>>;

    /// Get a single client by id.
    async fn get_client(&self, id: i64) -> Result<Client>;

    /// Create a client. Invalidates all cached client views.
    async fn create_client(&self, payload: ClientCreate) -> Result<Client>;

    /// Update a client. Invalidates all cached client views and seeds the
    /// detail entry for `id` with the response.
    async fn update_client(&self, id: i64, payload: ClientUpdate) -> Result<Client>;

    /// Soft-delete a client. Invalidates all cached client views and
    /// removes the detail entry for `id`.
    async fn delete_client(&self, id: i64) -> Result<()>;
}
