//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::{PaginationParams, MAX_PAGE_SIZE};

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Page number (1-indexed)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Results per page
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Fetch every page
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params.
    ///
    /// `default_limit` comes from the config file's preferences. The
    /// limit is clamped to what the API accepts.
    pub fn to_params(&self, default_limit: usize) -> PaginationParams {
        let limit = self.limit.unwrap_or(default_limit).min(MAX_PAGE_SIZE);
        let mut params = PaginationParams::new().limit(limit);
        if let Some(page) = self.page {
            params = params.page(page);
        }
        params
    }
}
