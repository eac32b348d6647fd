//! Command execution context
//!
//! Unified setup for commands that talk to the API: config loading,
//! session validation, token refresh, and client construction.

use std::sync::Arc;

use crate::cache::CachedTraqClient;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{AuthApi, TraqClient};
use crate::config::{Config, Session};
use crate::error::Result;

/// Context for command execution containing config, client, and options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Authenticated API client with caching (Arc-wrapped for parallel
    /// request support)
    pub client: Arc<CachedTraqClient<TraqClient>>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// Loads the config, requires a signed-in session, constructs the
    /// HTTP client with the resolved base URL, refreshes the access token
    /// when it is near expiry (persisting the new pair), and wraps the
    /// client with the caching layer.
    ///
    /// # Errors
    /// Returns an error when no session exists or the refresh is
    /// rejected, both pointing the user at `traq login`.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        config.validate_auth()?;

        let base_url = opts.api_url.clone().or_else(|| config.api_url.clone());
        let raw_client = TraqClient::new(base_url)?;

        let session = config.session.clone().expect("validated above");

        raw_client
            .set_session(
                session.access_token,
                session.refresh_token,
                session.expires_at,
            )
            .await;

        if config.is_token_expired() {
            // Refresh up front so every command starts authenticated, and
            // persist the new pair for future runs.
            raw_client.refresh_session_tokens().await?;
            if let Some(tokens) = raw_client.session_tokens().await {
                config.session = Some(Session {
                    username: session.username,
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token,
                    expires_at: tokens.expires_at,
                });
                config.save_at(opts.config_ref())?;
            }
        }

        // Wrap with caching layer (disabled if --no-cache)
        let client = Arc::new(CachedTraqClient::new(raw_client, !opts.no_cache));

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }
}
