//! Project management commands

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::handlers::run_list_command;
use crate::cli::{
    CommandContext, GlobalOptions, OutputFormat, PaginationArgs, ProjectCreateArgs,
    ProjectFilterArgs, ProjectUpdateArgs,
};
use crate::client::models::{Project, ProjectCreate, ProjectUpdate};
use crate::client::ProjectApi;
use crate::error::Result;
use crate::models::ProjectDisplay;
use crate::output;

/// Run the project list command
pub async fn list(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    filters: &ProjectFilterArgs,
) -> Result<()> {
    run_list_command::<Project, ProjectDisplay, _, _>(
        opts,
        pagination,
        "projects",
        |client, params| {
            let filter = filters.to_filter();
            async move { client.list_projects(&params, &filter).await }
        },
    )
    .await
}

/// Run the project get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let project = ctx.client.get_project(id).await?;
    output::print(&vec![ProjectDisplay::from(project)], ctx.format)
}

/// Run the project create command
pub async fn create(opts: &GlobalOptions, args: ProjectCreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = ProjectCreate {
        name: args.name,
        description: args.description,
        client_id: args.client,
        project_manager_id: args.manager,
        status_id: args.status,
        start_date: args.start,
        end_date: args.end,
        estimated_hours: args.estimated_hours,
        budget: args.budget,
        currency: args.currency,
        is_active: true,
    };

    let created = ctx.client.create_project(payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Project {} created", "✓".green(), created.id);
    }
    output::print(&vec![ProjectDisplay::from(created)], ctx.format)
}

/// Run the project update command
pub async fn update(opts: &GlobalOptions, id: i64, changes: ProjectUpdateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = ProjectUpdate {
        name: changes.name,
        description: changes.description,
        project_manager_id: changes.manager,
        status_id: changes.status,
        start_date: changes.start,
        end_date: changes.end,
        estimated_hours: changes.estimated_hours,
        budget: changes.budget,
        currency: changes.currency,
        is_active: changes.active,
    };

    let updated = ctx.client.update_project(id, payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Project {} updated", "✓".green(), id);
    }
    output::print(&vec![ProjectDisplay::from(updated)], ctx.format)
}

/// Run the project delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete project {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_project(id).await?;
    eprintln!("{} Project {} deleted", "✓".green(), id);
    Ok(())
}
