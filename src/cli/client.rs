//! Client management commands

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::handlers::run_list_command;
use crate::cli::{
    ClientCreateArgs, ClientFilterArgs, ClientUpdateArgs, CommandContext, GlobalOptions,
    OutputFormat, PaginationArgs,
};
use crate::client::models::{Client, ClientCreate, ClientUpdate};
use crate::client::ClientApi;
use crate::error::Result;
use crate::models::ClientDisplay;
use crate::output;

/// Run the client list command
pub async fn list(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    filters: &ClientFilterArgs,
) -> Result<()> {
    run_list_command::<Client, ClientDisplay, _, _>(opts, pagination, "clients", |client, params| {
        let filter = filters.to_filter();
        async move { client.list_clients(&params, &filter).await }
    })
    .await
}

/// Run the client get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let client = ctx.client.get_client(id).await?;
    output::print(&vec![ClientDisplay::from(client)], ctx.format)
}

/// Run the client create command
pub async fn create(opts: &GlobalOptions, args: ClientCreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = ClientCreate {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        country: args.country,
        timezone: args.timezone,
        is_active: true,
    };

    let created = ctx.client.create_client(payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Client {} created", "✓".green(), created.id);
    }
    output::print(&vec![ClientDisplay::from(created)], ctx.format)
}

/// Run the client update command
pub async fn update(opts: &GlobalOptions, id: i64, changes: ClientUpdateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = ClientUpdate {
        name: changes.name,
        email: changes.email,
        phone: changes.phone,
        address: changes.address,
        country: changes.country,
        timezone: changes.timezone,
        is_active: changes.active,
    };

    let updated = ctx.client.update_client(id, payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Client {} updated", "✓".green(), id);
    }
    output::print(&vec![ClientDisplay::from(updated)], ctx.format)
}

/// Run the client delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete client {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_client(id).await?;
    eprintln!("{} Client {} deleted", "✓".green(), id);
    Ok(())
}
