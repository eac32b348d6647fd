//! Time entry management commands

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::handlers::run_list_command;
use crate::cli::{
    CommandContext, EntryCreateArgs, EntryFilterArgs, EntryUpdateArgs, GlobalOptions,
    OutputFormat, PaginationArgs,
};
use crate::client::models::{parse_wall_time, TimeEntry, TimeEntryCreate, TimeEntryUpdate};
use crate::client::TimeEntryApi;
use crate::error::{Error, Result};
use crate::models::TimeEntryDisplay;
use crate::output;

/// Field-level check of an HH:MM argument, before any request is sent
fn validate_wall_time(label: &str, value: &str) -> Result<()> {
    if parse_wall_time(value).is_none() {
        return Err(Error::Validation(format!(
            "{} must be HH:MM, got '{}'",
            label, value
        )));
    }
    Ok(())
}

/// Run the entry list command
pub async fn list(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    filters: &EntryFilterArgs,
) -> Result<()> {
    run_list_command::<TimeEntry, TimeEntryDisplay, _, _>(
        opts,
        pagination,
        "time entries",
        |client, params| {
            let filter = filters.to_filter();
            async move { client.list_time_entries(&params, &filter).await }
        },
    )
    .await
}

/// Run the entry get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let entry = ctx.client.get_time_entry(id).await?;
    output::print(&vec![TimeEntryDisplay::from(entry)], ctx.format)
}

/// Run the entry create command
pub async fn create(opts: &GlobalOptions, args: EntryCreateArgs) -> Result<()> {
    validate_wall_time("--start", &args.start)?;
    if let Some(ref end) = args.end {
        validate_wall_time("--end", end)?;
        let start = parse_wall_time(&args.start).expect("validated above");
        let end = parse_wall_time(end).expect("validated above");
        if end <= start {
            return Err(Error::Validation(
                "--end must be after --start".to_string(),
            ));
        }
    }

    let ctx = CommandContext::new(opts).await?;

    let payload = TimeEntryCreate {
        work_date: args.date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        project_id: args.project,
        task_id: args.task,
        description: args.description,
        start_time: args.start,
        end_time: args.end,
        rate_per_hour: args.rate,
        currency: args.currency,
        comments: args.comments,
        is_billable: args.billable,
    };

    let created = ctx.client.create_time_entry(payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Time entry {} created", "✓".green(), created.id);
    }
    output::print(&vec![TimeEntryDisplay::from(created)], ctx.format)
}

/// Run the entry update command
pub async fn update(opts: &GlobalOptions, id: i64, changes: EntryUpdateArgs) -> Result<()> {
    if let Some(ref start) = changes.start {
        validate_wall_time("--start", start)?;
    }
    if let Some(ref end) = changes.end {
        validate_wall_time("--end", end)?;
    }

    let ctx = CommandContext::new(opts).await?;

    let payload = TimeEntryUpdate {
        work_date: changes.date,
        project_id: changes.project,
        task_id: changes.task,
        description: changes.description,
        start_time: changes.start,
        end_time: changes.end,
        rate_per_hour: changes.rate,
        currency: changes.currency,
        comments: changes.comments,
        is_billable: changes.billable,
    };

    let updated = ctx.client.update_time_entry(id, payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Time entry {} updated", "✓".green(), id);
    }
    output::print(&vec![TimeEntryDisplay::from(updated)], ctx.format)
}

/// Run the entry delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete time entry {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_time_entry(id).await?;
    eprintln!("{} Time entry {} deleted", "✓".green(), id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_wall_time_accepts_hhmm() {
        assert!(validate_wall_time("--start", "09:30").is_ok());
        assert!(validate_wall_time("--start", "23:59").is_ok());
    }

    #[test]
    fn test_validate_wall_time_rejects_garbage() {
        let err = validate_wall_time("--start", "9am").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("--start"));
    }
}
