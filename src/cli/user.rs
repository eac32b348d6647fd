//! User directory commands

use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, GlobalOptions, PaginationArgs, UserFilterArgs};
use crate::client::models::User;
use crate::client::UserApi;
use crate::error::Result;
use crate::models::UserDisplay;
use crate::output;

/// Run the user list command
pub async fn list(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    filters: &UserFilterArgs,
) -> Result<()> {
    run_list_command::<User, UserDisplay, _, _>(opts, pagination, "users", |client, params| {
        let filter = filters.to_filter();
        async move { client.list_users(&params, &filter).await }
    })
    .await
}

/// Run the user get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let user = ctx.client.get_user(id).await?;
    output::print(&vec![UserDisplay::from(user)], ctx.format)
}
