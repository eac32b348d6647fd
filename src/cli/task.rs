//! Task management commands

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::handlers::run_list_command;
use crate::cli::{
    CommandContext, GlobalOptions, OutputFormat, PaginationArgs, TaskCreateArgs, TaskFilterArgs,
    TaskUpdateArgs,
};
use crate::client::models::{Task, TaskCreate, TaskUpdate};
use crate::client::TaskApi;
use crate::error::Result;
use crate::models::{LookupDisplay, TaskDisplay};
use crate::output;

/// Run the task list command
pub async fn list(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    filters: &TaskFilterArgs,
) -> Result<()> {
    run_list_command::<Task, TaskDisplay, _, _>(opts, pagination, "tasks", |client, params| {
        let filter = filters.to_filter();
        async move { client.list_tasks(&params, &filter).await }
    })
    .await
}

/// Run the task get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let task = ctx.client.get_task(id).await?;
    output::print(&vec![TaskDisplay::from(task)], ctx.format)
}

/// Run the task create command
pub async fn create(opts: &GlobalOptions, args: TaskCreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = TaskCreate {
        name: args.name,
        description: args.description,
        project_id: args.project,
        parent_task_id: args.parent,
        category_id: args.category,
        priority_id: args.priority,
        status_id: args.status,
        assigned_to: args.assignee,
        estimated_hours: args.estimated_hours,
        rate_per_hour: args.rate,
        currency: args.currency,
        due_date: args.due,
        is_active: true,
    };

    let created = ctx.client.create_task(payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Task {} created", "✓".green(), created.id);
    }
    output::print(&vec![TaskDisplay::from(created)], ctx.format)
}

/// Run the task update command
pub async fn update(opts: &GlobalOptions, id: i64, changes: TaskUpdateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = TaskUpdate {
        name: changes.name,
        description: changes.description,
        category_id: changes.category,
        priority_id: changes.priority,
        status_id: changes.status,
        assigned_to: changes.assignee,
        estimated_hours: changes.estimated_hours,
        rate_per_hour: changes.rate,
        currency: changes.currency,
        due_date: changes.due,
        is_active: changes.active,
    };

    let updated = ctx.client.update_task(id, payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Task {} updated", "✓".green(), id);
    }
    output::print(&vec![TaskDisplay::from(updated)], ctx.format)
}

/// Run the task delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete task {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_task(id).await?;
    eprintln!("{} Task {} deleted", "✓".green(), id);
    Ok(())
}

/// Run the task assign command
pub async fn assign(opts: &GlobalOptions, id: i64, user_id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let updated = ctx.client.assign_task(id, user_id).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Task {} assigned to user {}", "✓".green(), id, user_id);
    }
    output::print(&vec![TaskDisplay::from(updated)], ctx.format)
}

/// Run the task set-status command
pub async fn set_status(opts: &GlobalOptions, id: i64, status_id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let updated = ctx.client.set_task_status(id, status_id).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Task {} moved to status {}", "✓".green(), id, status_id);
    }
    output::print(&vec![TaskDisplay::from(updated)], ctx.format)
}

/// Run the task categories command
pub async fn categories(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let rows: Vec<LookupDisplay> = ctx
        .client
        .list_task_categories()
        .await?
        .into_iter()
        .map(LookupDisplay::from)
        .collect();
    output::print(&rows, ctx.format)
}

/// Run the task statuses command
pub async fn statuses(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let rows: Vec<LookupDisplay> = ctx
        .client
        .list_task_statuses()
        .await?
        .into_iter()
        .map(LookupDisplay::from)
        .collect();
    output::print(&rows, ctx.format)
}

/// Run the task priorities command
pub async fn priorities(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let rows: Vec<LookupDisplay> = ctx
        .client
        .list_priorities()
        .await?
        .into_iter()
        .map(LookupDisplay::from)
        .collect();
    output::print(&rows, ctx.format)
}
