//! CLI command definitions and handlers

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod calendar;
pub mod client;
pub mod completions;
pub mod context;
pub mod handlers;
pub mod login;
pub mod project;
pub mod status;
pub mod task;
pub mod time_entry;
pub mod timer;
pub mod user;

pub use args::{
    CalendarFilterArgs, ClientFilterArgs, EntryFilterArgs, GlobalOptions, PaginationArgs,
    ProjectFilterArgs, TaskFilterArgs, UserFilterArgs,
};
pub use context::CommandContext;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with color
    Pretty,
    /// Plain table output
    Table,
    /// JSON envelope with metadata
    Json,
}

/// Traq CLI - companion for the Traq project-management platform
#[derive(Parser, Debug)]
#[command(name = "traq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TRAQ_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TRAQ_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override API base URL
    #[arg(long, global = true, env = "TRAQ_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "TRAQ_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "TRAQ_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store session tokens
    Login(LoginArgs),

    /// Sign out and clear session tokens
    Logout,

    /// Show the signed-in user's profile
    Whoami,

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Manage time entries
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Track work time
    #[command(subcommand)]
    Timer(TimerCommands),

    /// Manage calendar events
    #[command(subcommand)]
    Calendar(CalendarCommands),

    /// Browse the user directory
    #[command(subcommand)]
    User(UserCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Arguments for `traq login`
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(long)]
    pub username: Option<String>,
}

// ============================================================================
// Client commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// List clients
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[command(flatten)]
        filters: ClientFilterArgs,
    },
    /// Show one client
    Get { id: i64 },
    /// Create a client
    Create(ClientCreateArgs),
    /// Update a client
    Update {
        id: i64,
        #[command(flatten)]
        changes: ClientUpdateArgs,
    },
    /// Soft-delete a client
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct ClientCreateArgs {
    /// Client name
    pub name: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// IANA timezone name
    #[arg(long, default_value = "UTC")]
    pub timezone: String,
}

#[derive(Args, Debug, Default)]
pub struct ClientUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub timezone: Option<String>,

    /// Set the active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

// ============================================================================
// Project commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[command(flatten)]
        filters: ProjectFilterArgs,
    },
    /// Show one project
    Get { id: i64 },
    /// Create a project
    Create(ProjectCreateArgs),
    /// Update a project
    Update {
        id: i64,
        #[command(flatten)]
        changes: ProjectUpdateArgs,
    },
    /// Soft-delete a project
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct ProjectCreateArgs {
    /// Project name
    pub name: String,

    /// Owning client id
    #[arg(long)]
    pub client: i64,

    /// Project manager user id
    #[arg(long)]
    pub manager: i64,

    /// Status id
    #[arg(long, default_value_t = 1)]
    pub status: i64,

    #[arg(long)]
    pub description: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub estimated_hours: Option<f64>,

    #[arg(long)]
    pub budget: Option<f64>,

    #[arg(long, default_value = "USD")]
    pub currency: String,
}

#[derive(Args, Debug, Default)]
pub struct ProjectUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Project manager user id
    #[arg(long)]
    pub manager: Option<i64>,

    /// Status id
    #[arg(long)]
    pub status: Option<i64>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub estimated_hours: Option<f64>,

    #[arg(long)]
    pub budget: Option<f64>,

    #[arg(long)]
    pub currency: Option<String>,

    /// Set the active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

// ============================================================================
// Task commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[command(flatten)]
        filters: TaskFilterArgs,
    },
    /// Show one task
    Get { id: i64 },
    /// Create a task
    Create(TaskCreateArgs),
    /// Update a task
    Update {
        id: i64,
        #[command(flatten)]
        changes: TaskUpdateArgs,
    },
    /// Soft-delete a task
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Assign a task to a user
    Assign {
        id: i64,
        /// Assignee user id
        user_id: i64,
    },
    /// Move a task to a new status
    SetStatus {
        id: i64,
        /// Target status id
        status_id: i64,
    },
    /// List task categories
    Categories,
    /// List task statuses
    Statuses,
    /// List priorities
    Priorities,
}

#[derive(Args, Debug)]
pub struct TaskCreateArgs {
    /// Task name
    pub name: String,

    /// Owning project id
    #[arg(long)]
    pub project: i64,

    /// Category id
    #[arg(long, default_value_t = 1)]
    pub category: i64,

    /// Priority id
    #[arg(long, default_value_t = 2)]
    pub priority: i64,

    /// Status id
    #[arg(long, default_value_t = 1)]
    pub status: i64,

    #[arg(long)]
    pub description: Option<String>,

    /// Parent task id (creates a subtask)
    #[arg(long)]
    pub parent: Option<i64>,

    /// Assignee user id
    #[arg(long)]
    pub assignee: Option<i64>,

    #[arg(long)]
    pub estimated_hours: Option<f64>,

    #[arg(long)]
    pub rate: Option<f64>,

    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Category id
    #[arg(long)]
    pub category: Option<i64>,

    /// Priority id
    #[arg(long)]
    pub priority: Option<i64>,

    /// Status id
    #[arg(long)]
    pub status: Option<i64>,

    /// Assignee user id
    #[arg(long)]
    pub assignee: Option<i64>,

    #[arg(long)]
    pub estimated_hours: Option<f64>,

    #[arg(long)]
    pub rate: Option<f64>,

    #[arg(long)]
    pub currency: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,

    /// Set the active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

// ============================================================================
// Time entry commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// List time entries
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[command(flatten)]
        filters: EntryFilterArgs,
    },
    /// Show one time entry
    Get { id: i64 },
    /// Create a closed time entry
    Create(EntryCreateArgs),
    /// Update a time entry
    Update {
        id: i64,
        #[command(flatten)]
        changes: EntryUpdateArgs,
    },
    /// Soft-delete a time entry
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct EntryCreateArgs {
    /// Project id
    #[arg(long)]
    pub project: i64,

    /// Task id
    #[arg(long)]
    pub task: i64,

    /// Work date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: String,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub rate: Option<f64>,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub comments: Option<String>,

    /// Mark the entry billable (true/false)
    #[arg(long)]
    pub billable: Option<bool>,
}

#[derive(Args, Debug, Default)]
pub struct EntryUpdateArgs {
    /// Work date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Project id
    #[arg(long)]
    pub project: Option<i64>,

    /// Task id
    #[arg(long)]
    pub task: Option<i64>,

    #[arg(long)]
    pub description: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub rate: Option<f64>,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub comments: Option<String>,

    /// Mark the entry billable (true/false)
    #[arg(long)]
    pub billable: Option<bool>,
}

// ============================================================================
// Timer commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum TimerCommands {
    /// Start the timer on a task
    Start {
        /// Project id
        #[arg(long)]
        project: i64,

        /// Task id
        #[arg(long)]
        task: i64,

        /// What is being worked on
        #[arg(long)]
        description: Option<String>,
    },
    /// Stop the running timer
    Stop {
        /// Final description for the entry
        #[arg(long)]
        description: Option<String>,
    },
    /// Show whether a timer is running
    Status,
    /// Follow the running timer with a live elapsed readout
    Watch,
    /// Show tracked-hours summary
    Summary,
}

// ============================================================================
// Calendar commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// List calendar events
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[command(flatten)]
        filters: CalendarFilterArgs,
    },
    /// Show one event
    Get { id: i64 },
    /// Create an event
    Create(CalendarCreateArgs),
    /// Update an event
    Update {
        id: i64,
        #[command(flatten)]
        changes: CalendarUpdateArgs,
    },
    /// Soft-delete an event
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Upload a spreadsheet of events
    Upload {
        /// Path to the .xlsx/.xls/.csv file
        file: std::path::PathBuf,
    },
    /// Show calendar statistics
    Stats,
}

#[derive(Args, Debug)]
pub struct CalendarCreateArgs {
    /// Event name
    pub name: String,

    /// Start time (RFC 3339, e.g. 2025-04-01T09:00:00Z)
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// End time (RFC 3339)
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub organizer: Option<String>,

    /// Comma-separated attendee list
    #[arg(long)]
    pub attendees: Option<String>,

    /// Recurrence label (e.g. daily, weekly)
    #[arg(long)]
    pub recurring: Option<String>,

    #[arg(long)]
    pub link: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CalendarUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Start time (RFC 3339)
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// End time (RFC 3339)
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub organizer: Option<String>,

    /// Comma-separated attendee list
    #[arg(long)]
    pub attendees: Option<String>,

    /// Recurrence label
    #[arg(long)]
    pub recurring: Option<String>,

    #[arg(long)]
    pub link: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Set the active flag (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

// ============================================================================
// User commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[command(flatten)]
        filters: UserFilterArgs,
    },
    /// Show one user
    Get { id: i64 },
}

// ============================================================================
// Cache commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Remove all cached responses
    Clear,
    /// Print the cache directory path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_list_with_filters() {
        let cli = Cli::parse_from([
            "traq", "task", "list", "--project", "3", "--limit", "5", "--format", "json",
        ]);

        match cli.command {
            Commands::Task(TaskCommands::List { pagination, filters }) => {
                assert_eq!(filters.project, Some(3));
                assert_eq!(pagination.limit, Some(5));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_timer_start() {
        let cli = Cli::parse_from(["traq", "timer", "start", "--project", "1", "--task", "2"]);

        match cli.command {
            Commands::Timer(TimerCommands::Start { project, task, .. }) => {
                assert_eq!(project, 1);
                assert_eq!(task, 2);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_all_conflicts_with_page() {
        let result = Cli::try_parse_from(["traq", "task", "list", "--all", "--page", "2"]);
        assert!(result.is_err());
    }
}
