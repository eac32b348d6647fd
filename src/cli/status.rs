//! Status command: configuration and session at a glance
//!
//! Works entirely offline so it stays usable when the API is down.

use colored::Colorize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::formatters::format_datetime_local;

/// Run the status command
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let api_url = opts
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| "(default)".to_string());

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "config_path": config_path.display().to_string(),
                "api_url": api_url,
                "signed_in": config.session.is_some(),
                "username": config.session.as_ref().map(|s| s.username.clone()),
                "token_expires_at": config.session.as_ref().map(|s| s.expires_at.to_rfc3339()),
                "token_expired": config.is_token_expired(),
                "page_size": config.preferences.page_size,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}", "Traq status".bold());
            println!("────────────────────────────────────────");
            println!("Config:         {}", config_path.display());
            println!("API URL:        {}", api_url);

            match &config.session {
                Some(session) => {
                    println!("Signed in as:   {}", session.username.bold());
                    let expiry = format_datetime_local(&session.expires_at);
                    if config.is_token_expired() {
                        println!(
                            "Token:          {} (refreshes on next command)",
                            format!("expired {}", expiry).yellow()
                        );
                    } else {
                        println!("Token:          valid until {}", expiry);
                    }
                }
                None => {
                    println!("Signed in as:   {}", "(not signed in)".yellow());
                    println!("                Run {} to sign in.", "traq login".cyan());
                }
            }

            println!("Page size:      {}", config.preferences.page_size);
        }
    }

    Ok(())
}
