//! Traq CLI - companion for the Traq project-management platform

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::{
    CacheCommands, CalendarCommands, Cli, ClientCommands, Commands, EntryCommands, GlobalOptions,
    ProjectCommands, TaskCommands, TimerCommands, UserCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login(args) => cli::login::login(&opts, args.username).await,
        Commands::Logout => cli::login::logout(&opts).await,
        Commands::Whoami => cli::login::whoami(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("traq version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Client(cmd) => match cmd {
            ClientCommands::List { pagination, filters } => {
                cli::client::list(&opts, &pagination, &filters).await
            }
            ClientCommands::Get { id } => cli::client::get(&opts, id).await,
            ClientCommands::Create(args) => cli::client::create(&opts, args).await,
            ClientCommands::Update { id, changes } => cli::client::update(&opts, id, changes).await,
            ClientCommands::Delete { id, yes } => cli::client::delete(&opts, id, yes).await,
        },
        Commands::Project(cmd) => match cmd {
            ProjectCommands::List { pagination, filters } => {
                cli::project::list(&opts, &pagination, &filters).await
            }
            ProjectCommands::Get { id } => cli::project::get(&opts, id).await,
            ProjectCommands::Create(args) => cli::project::create(&opts, args).await,
            ProjectCommands::Update { id, changes } => {
                cli::project::update(&opts, id, changes).await
            }
            ProjectCommands::Delete { id, yes } => cli::project::delete(&opts, id, yes).await,
        },
        Commands::Task(cmd) => match cmd {
            TaskCommands::List { pagination, filters } => {
                cli::task::list(&opts, &pagination, &filters).await
            }
            TaskCommands::Get { id } => cli::task::get(&opts, id).await,
            TaskCommands::Create(args) => cli::task::create(&opts, args).await,
            TaskCommands::Update { id, changes } => cli::task::update(&opts, id, changes).await,
            TaskCommands::Delete { id, yes } => cli::task::delete(&opts, id, yes).await,
            TaskCommands::Assign { id, user_id } => cli::task::assign(&opts, id, user_id).await,
            TaskCommands::SetStatus { id, status_id } => {
                cli::task::set_status(&opts, id, status_id).await
            }
            TaskCommands::Categories => cli::task::categories(&opts).await,
            TaskCommands::Statuses => cli::task::statuses(&opts).await,
            TaskCommands::Priorities => cli::task::priorities(&opts).await,
        },
        Commands::Entry(cmd) => match cmd {
            EntryCommands::List { pagination, filters } => {
                cli::time_entry::list(&opts, &pagination, &filters).await
            }
            EntryCommands::Get { id } => cli::time_entry::get(&opts, id).await,
            EntryCommands::Create(args) => cli::time_entry::create(&opts, args).await,
            EntryCommands::Update { id, changes } => {
                cli::time_entry::update(&opts, id, changes).await
            }
            EntryCommands::Delete { id, yes } => cli::time_entry::delete(&opts, id, yes).await,
        },
        Commands::Timer(cmd) => match cmd {
            TimerCommands::Start {
                project,
                task,
                description,
            } => cli::timer::start(&opts, project, task, description).await,
            TimerCommands::Stop { description } => cli::timer::stop(&opts, description).await,
            TimerCommands::Status => cli::timer::status(&opts).await,
            TimerCommands::Watch => cli::timer::watch(&opts).await,
            TimerCommands::Summary => cli::timer::summary(&opts).await,
        },
        Commands::Calendar(cmd) => match cmd {
            CalendarCommands::List { pagination, filters } => {
                cli::calendar::list(&opts, &pagination, &filters).await
            }
            CalendarCommands::Get { id } => cli::calendar::get(&opts, id).await,
            CalendarCommands::Create(args) => cli::calendar::create(&opts, args).await,
            CalendarCommands::Update { id, changes } => {
                cli::calendar::update(&opts, id, changes).await
            }
            CalendarCommands::Delete { id, yes } => cli::calendar::delete(&opts, id, yes).await,
            CalendarCommands::Upload { file } => cli::calendar::upload(&opts, &file).await,
            CalendarCommands::Stats => cli::calendar::stats(&opts).await,
        },
        Commands::User(cmd) => match cmd {
            UserCommands::List { pagination, filters } => {
                cli::user::list(&opts, &pagination, &filters).await
            }
            UserCommands::Get { id } => cli::user::get(&opts, id).await,
        },
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(opts.format),
            CacheCommands::Clear => cli::cache::clear(opts.format),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Completions { shell } => cli::completions::run(shell),
    }
}
