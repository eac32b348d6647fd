//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Consolidates the global flags from the CLI into a single unit so
/// handler signatures stay small.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config-file defaults are resolved in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.traq/config.yaml)
    pub config: Option<String>,

    /// API base URL override
    pub api_url: Option<String>,

    /// Bypass cache and fetch fresh data from API
    pub no_cache: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            no_cache: cli.no_cache,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API URL override as `Option<&str>`.
    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_accessors() {
        let opts = GlobalOptions {
            format: OutputFormat::Json,
            config: Some("/custom/path".to_string()),
            api_url: Some("http://localhost:8000/api".to_string()),
            no_cache: true,
        };

        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.api_url_ref(), Some("http://localhost:8000/api"));
        assert!(opts.no_cache);
    }

    #[test]
    fn test_global_options_none_accessors() {
        let opts = GlobalOptions {
            format: OutputFormat::Pretty,
            config: None,
            api_url: None,
            no_cache: false,
        };

        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_url_ref(), None);
        assert!(!opts.no_cache);
    }
}
