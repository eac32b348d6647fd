//! Generic list command handler
//!
//! Every list command follows the same flow: build a context, fetch a
//! page through the cached client, optionally fan out over the remaining
//! pages for `--all`, convert to display rows, print.

use std::future::Future;
use std::sync::Arc;

use colored::Colorize;
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cache::CachedTraqClient;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat, PaginationArgs};
use crate::client::parallel::{fetch_remaining_pages, PARALLEL_FETCH_LIMIT};
use crate::client::{Page, PaginationParams, TraqClient};
use crate::error::Result;
use crate::output;

/// Arc-wrapped cached client shared by list fetch closures
pub type SharedClient = Arc<CachedTraqClient<TraqClient>>;

/// Run a standard list command.
///
/// # Type Parameters
///
/// * `T` - The API model type (e.g. `Task`)
/// * `D` - The display type implementing `From<T>`, `Tabled`, `Serialize`
///
/// The fetcher is called once for the requested page, and once per
/// remaining page when `--all` is set, so it must be a `Fn` closure that
/// captures its filters by reference.
pub async fn run_list_command<T, D, F, Fut>(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    T: Clone + Send + 'static,
    D: From<T> + Tabled + Serialize,
    F: Fn(SharedClient, PaginationParams) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    let ctx = CommandContext::new(opts).await?;

    let params = pagination.to_params(ctx.config.preferences.page_size);
    debug!("Fetching {} ({:?})", resource_name, params);

    let first = fetcher(ctx.client.clone(), params.clone()).await?;

    let total_items = first.total_items;
    let total_pages = first.total_pages;
    let current_page = first.current_page;

    let mut items = first.items;

    if pagination.all && total_pages > 1 {
        debug!(
            "Fetching {} remaining {} pages",
            total_pages - 1,
            resource_name
        );

        let limit = params.limit;
        let remaining: Vec<usize> = (2..=total_pages).collect();
        let rest = fetch_remaining_pages(
            remaining,
            |page| {
                let client = ctx.client.clone();
                let mut page_params = PaginationParams::new().page(page);
                if let Some(limit) = limit {
                    page_params = page_params.limit(limit);
                }
                let fut = fetcher(client, page_params);
                async move { Ok(fut.await?.items) }
            },
            PARALLEL_FETCH_LIMIT,
        )
        .await?;
        items.extend(rest);
    }

    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    output::print(&display_items, ctx.format)?;

    if ctx.format == OutputFormat::Pretty && !pagination.all && total_pages > 1 {
        println!(
            "{}",
            format!(
                "page {}/{} of {} {} (use --all to fetch every page)",
                current_page, total_pages, total_items, resource_name
            )
            .dimmed()
        );
    }

    Ok(())
}
