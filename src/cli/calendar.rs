//! Calendar event commands

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::handlers::run_list_command;
use crate::cli::{
    CalendarCreateArgs, CalendarFilterArgs, CalendarUpdateArgs, CommandContext, GlobalOptions,
    OutputFormat, PaginationArgs,
};
use crate::client::models::{CalendarEvent, CalendarEventCreate, CalendarEventUpdate};
use crate::client::CalendarApi;
use crate::error::{Error, Result};
use crate::models::CalendarEventDisplay;
use crate::output;
use crate::output::formatters::opt_datetime_local;
use crate::output::json::format_json;

/// Spreadsheet extensions the upload endpoint accepts
const UPLOAD_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Run the calendar list command
pub async fn list(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    filters: &CalendarFilterArgs,
) -> Result<()> {
    run_list_command::<CalendarEvent, CalendarEventDisplay, _, _>(
        opts,
        pagination,
        "calendar events",
        |client, params| {
            let filter = filters.to_filter();
            async move { client.list_calendar_events(&params, &filter).await }
        },
    )
    .await
}

/// Run the calendar get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let event = ctx.client.get_calendar_event(id).await?;
    output::print(&vec![CalendarEventDisplay::from(event)], ctx.format)
}

/// Run the calendar create command
pub async fn create(opts: &GlobalOptions, args: CalendarCreateArgs) -> Result<()> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        if end <= start {
            return Err(Error::Validation("--end must be after --start".to_string()));
        }
    }

    let ctx = CommandContext::new(opts).await?;

    let payload = CalendarEventCreate {
        event_name: args.name,
        start_time: args.start,
        end_time: args.end,
        location: args.location,
        organizer: args.organizer,
        attendees: args.attendees,
        recurring: args.recurring,
        meeting_link: args.link,
        description: args.description,
        is_active: Some(true),
    };

    let created = ctx.client.create_calendar_event(payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Event {} created", "✓".green(), created.id);
    }
    output::print(&vec![CalendarEventDisplay::from(created)], ctx.format)
}

/// Run the calendar update command
pub async fn update(opts: &GlobalOptions, id: i64, changes: CalendarUpdateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = CalendarEventUpdate {
        event_name: changes.name,
        start_time: changes.start,
        end_time: changes.end,
        location: changes.location,
        organizer: changes.organizer,
        attendees: changes.attendees,
        recurring: changes.recurring,
        meeting_link: changes.link,
        description: changes.description,
        is_active: changes.active,
    };

    let updated = ctx.client.update_calendar_event(id, payload).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Event {} updated", "✓".green(), id);
    }
    output::print(&vec![CalendarEventDisplay::from(updated)], ctx.format)
}

/// Run the calendar delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete calendar event {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_calendar_event(id).await?;
    eprintln!("{} Event {} deleted", "✓".green(), id);
    Ok(())
}

/// Run the calendar upload command
pub async fn upload(opts: &GlobalOptions, file: &Path) -> Result<()> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::Validation(format!(
            "Unsupported file type '.{}' (expected one of: {})",
            extension,
            UPLOAD_EXTENSIONS.join(", ")
        )));
    }

    let bytes = std::fs::read(file)?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("calendar.xlsx")
        .to_string();

    let ctx = CommandContext::new(opts).await?;

    let report = ctx.client.upload_calendar(&file_name, bytes).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        _ => {
            let mark = if report.success { "✓".green() } else { "✗".red() };
            eprintln!("{} {}", mark, report.message);
            println!("Total records:     {}", report.total_records);
            println!("Inserted:          {}", report.inserted_records);
            println!("Duplicates:        {}", report.duplicate_records);
            println!("Invalid:           {}", report.invalid_records);
        }
    }
    Ok(())
}

/// Run the calendar stats command
pub async fn stats(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let stats = ctx.client.calendar_stats().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&stats)?),
        _ => {
            println!("{}", "Calendar".bold());
            println!("────────────────────────────────────────");
            println!("Total events:      {}", stats.total_events);
            println!("Unique events:     {}", stats.unique_events);
            println!(
                "Earliest:          {}",
                opt_datetime_local(&stats.earliest_event)
            );
            println!(
                "Latest:            {}",
                opt_datetime_local(&stats.latest_event)
            );
            if let Some(total) = stats.total_duration_hours {
                println!("Total duration:    {:.1}h", total);
            }
            if let Some(avg) = stats.avg_duration_hours {
                println!("Average duration:  {:.1}h", avg);
            }
        }
    }
    Ok(())
}
