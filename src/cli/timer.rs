//! Timer commands
//!
//! The running timer is a single server-side resource. Start and stop are
//! mutations that keep the cached active-timer entry consistent; `watch`
//! holds a local one-second tick and recomputes elapsed time from the
//! start timestamp on every frame, so the readout survives suspend/resume
//! without drifting.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::{interval, MissedTickBehavior};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::models::{TimeEntry, TimerStart, TimerStop};
use crate::client::TimeEntryApi;
use crate::error::{Error, Result};
use crate::output::formatters::{format_elapsed, format_hours};
use crate::output::json::format_json;

/// Wall-clock HH:MM in the local timezone
fn now_wall_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

fn elapsed_now(entry: &TimeEntry) -> i64 {
    entry.elapsed_seconds(chrono::Local::now().time())
}

fn describe(entry: &TimeEntry) -> String {
    let task = entry
        .task_name
        .clone()
        .unwrap_or_else(|| format!("task {}", entry.task_id));
    match entry.description.as_deref() {
        Some(description) if !description.is_empty() => format!("{} — {}", task, description),
        _ => task,
    }
}

/// Run the timer start command
pub async fn start(
    opts: &GlobalOptions,
    project: i64,
    task: i64,
    description: Option<String>,
) -> Result<()> {
    if project <= 0 || task <= 0 {
        return Err(Error::Validation(
            "--project and --task must be positive ids".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts).await?;

    let payload = TimerStart {
        project_id: project,
        task_id: task,
        description: description.unwrap_or_else(|| "Work in progress".to_string()),
        start_time: now_wall_time(),
    };

    // A second start while one is running comes back as a conflict from
    // the server; nothing changes client-side in that case.
    let entry = ctx.client.start_timer(payload).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&entry)?),
        _ => {
            eprintln!(
                "{} Timer started at {} on {}",
                "▶".green(),
                entry.start_time,
                describe(&entry)
            );
        }
    }
    Ok(())
}

/// Run the timer stop command
pub async fn stop(opts: &GlobalOptions, description: Option<String>) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let payload = TimerStop {
        end_time: now_wall_time(),
        description,
    };

    let entry = ctx.client.stop_timer(payload).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&entry)?),
        _ => {
            let hours = entry
                .total_hours
                .map(format_hours)
                .unwrap_or_else(|| "unknown duration".to_string());
            eprintln!(
                "{} Timer stopped, recorded {} on {}",
                "■".red(),
                hours,
                describe(&entry)
            );
        }
    }
    Ok(())
}

/// Run the timer status command
pub async fn status(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let active = ctx.client.active_timer().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&active)?),
        _ => match active {
            Some(entry) => {
                println!(
                    "{} {} elapsed on {}",
                    "▶".green(),
                    format_elapsed(elapsed_now(&entry)).bold(),
                    describe(&entry)
                );
            }
            None => println!("No timer running."),
        },
    }
    Ok(())
}

/// Run the timer watch command
///
/// Ticks once per second until the timer stops or the user detaches with
/// Ctrl-C. The active entry is re-read through the cache on every tick;
/// its short TTL revalidates against the server periodically, so a stop
/// issued elsewhere is noticed without polling the API every second.
pub async fn watch(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let Some(entry) = ctx.client.active_timer().await? else {
        println!("No timer running.");
        return Ok(());
    };

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("static template is valid"),
    );

    let label = describe(&entry);
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match ctx.client.active_timer().await? {
                    Some(current) => {
                        bar.set_message(format!(
                            "{} — {}",
                            format_elapsed(elapsed_now(&current)),
                            label
                        ));
                        bar.tick();
                    }
                    None => {
                        bar.finish_and_clear();
                        println!("Timer stopped.");
                        return Ok(());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                bar.finish_and_clear();
                eprintln!("Detached. The timer keeps running; stop it with `traq timer stop`.");
                return Ok(());
            }
        }
    }
}

/// Run the timer summary command
pub async fn summary(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let summary = ctx.client.time_summary().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&summary)?),
        _ => {
            println!("{}", "Tracked hours".bold());
            println!("────────────────────────────────────────");
            println!(
                "Today:       {:>10}   billable {:>10}",
                format_hours(summary.total_hours_today),
                format_hours(summary.billable_hours_today)
            );
            println!(
                "This week:   {:>10}   billable {:>10}",
                format_hours(summary.total_hours_week),
                format_hours(summary.billable_hours_week)
            );
            println!(
                "This month:  {:>10}   billable {:>10}",
                format_hours(summary.total_hours_month),
                format_hours(summary.billable_hours_month)
            );

            match summary.active_timer {
                Some(entry) => println!(
                    "\n{} {} elapsed on {}",
                    "▶".green(),
                    format_elapsed(elapsed_now(&entry)),
                    describe(&entry)
                ),
                None => println!("\nNo timer running."),
            }
        }
    }
    Ok(())
}
