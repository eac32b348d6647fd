//! Login, logout, and whoami commands

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::http::decode_token_expiry;
use crate::client::{AuthApi, TraqClient};
use crate::config::{Config, Session};
use crate::error::Result;
use crate::output::formatters::opt_datetime_local;
use crate::output::json::format_json;

/// Run the login command
pub async fn login(opts: &GlobalOptions, username: Option<String>) -> Result<()> {
    // Keep whatever non-session settings already exist
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let username = match username {
        Some(username) => username,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    };

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let base_url = opts.api_url.clone().or_else(|| config.api_url.clone());
    let client = TraqClient::new(base_url)?;

    eprintln!("{}", "Signing in...".cyan());
    let pair = client.login(&username, &password).await?;

    let expires_at = decode_token_expiry(&pair.access_token)
        .unwrap_or_else(|| chrono::Utc::now() + chrono::Duration::hours(8));

    config.session = Some(Session {
        username: username.clone(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_at,
    });
    if let Some(api_url) = opts.api_url.clone() {
        config.api_url = Some(api_url);
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    eprintln!("{} Signed in as {}", "✓".green(), username.bold());
    eprintln!("  Session saved to {}", config_path.display());
    eprintln!("\n{}", "Try running:".bold());
    eprintln!("  {} - List your projects", "traq project list".cyan());
    eprintln!("  {} - Start tracking time", "traq timer start".cyan());

    Ok(())
}

/// Run the logout command
///
/// The server call is best-effort; local tokens are cleared either way.
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    match CommandContext::new(opts).await {
        Ok(ctx) => {
            if let Err(err) = ctx.client.logout().await {
                log::warn!("Server logout failed, clearing local session anyway: {}", err);
            }
        }
        Err(err) => {
            log::debug!("No usable session to revoke: {}", err);
        }
    }

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    config.session = None;
    config.save_at(opts.config_ref())?;

    eprintln!("{} Signed out", "✓".green());
    Ok(())
}

/// Run the whoami command
pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let user = ctx.client.me().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&user)?),
        _ => {
            println!("{}: {}", "User".bold(), user.full_name);
            println!("{}: {}", "Username".dimmed(), user.username);
            println!("{}: {}", "Email".dimmed(), user.email);
            println!("{}: {}", "Timezone".dimmed(), user.timezone);
            println!(
                "{}: {}",
                "Last login".dimmed(),
                opt_datetime_local(&user.last_login)
            );
        }
    }
    Ok(())
}
