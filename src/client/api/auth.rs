//! Authentication operations

use async_trait::async_trait;

use crate::client::models::{CurrentUser, TokenPair};
use crate::error::Result;

/// Authentication operations for the Traq API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair>;

    /// Mint a new token pair from a refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair>;

    /// Fetch the signed-in user's profile.
    async fn me(&self) -> Result<CurrentUser>;

    /// Invalidate the session server-side.
    ///
    /// Local token cleanup happens regardless of whether this call
    /// succeeds.
    async fn logout(&self) -> Result<()>;
}
