//! User listing operations

use async_trait::async_trait;

use crate::client::models::{User, UserFilter};
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// User directory operations
///
/// User administration (create/update/delete) is restricted to the web
/// console; the CLI only reads the directory.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// List users with pagination and filters.
    async fn list_users(
        &self,
        pagination: &PaginationParams,
        filter: &UserFilter,
    ) -> Result<Page<User>>;

    /// Get a single user by id.
    async fn get_user(&self, id: i64) -> Result<User>;
}
