//! Configuration management for Traq

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL override (defaults to the public Traq API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Signed-in session tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Bearer-token session obtained from the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Username the session was created for
    pub username: String,

    /// Short-lived access token sent as `Authorization: Bearer`
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,

    /// Access token expiration time
    pub expires_at: DateTime<Utc>,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default page size for list requests
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    10
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".traq").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path override
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional path override
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = Self::resolve_path(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Tokens live in this file, keep it private
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Check if the access token is expired or will expire soon (within 5 minutes)
    pub fn is_token_expired(&self) -> bool {
        match &self.session {
            None => true,
            Some(session) => {
                let now = Utc::now();
                let buffer = chrono::Duration::minutes(5);
                session.expires_at - buffer < now
            }
        }
    }

    /// Validate that a signed-in session is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.session.is_none() {
            return Err(ConfigError::MissingCredentials.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            username: "erin".to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.session.is_none());
        assert_eq!(config.preferences.page_size, 10);
    }

    #[test]
    fn test_validate_auth() {
        let mut config = Config::default();
        assert!(config.validate_auth().is_err());

        config.session = Some(session(Utc::now() + chrono::Duration::hours(1)));
        assert!(config.validate_auth().is_ok());
    }

    #[test]
    fn test_token_expiry() {
        let mut config = Config::default();

        // No session should count as expired
        assert!(config.is_token_expired());

        // Token expired in the past
        config.session = Some(session(Utc::now() - chrono::Duration::hours(1)));
        assert!(config.is_token_expired());

        // Token expires in the future (more than 5 minutes)
        config.session = Some(session(Utc::now() + chrono::Duration::hours(1)));
        assert!(!config.is_token_expired());

        // Token expires soon (less than 5 minutes)
        config.session = Some(session(Utc::now() + chrono::Duration::minutes(2)));
        assert!(config.is_token_expired());
    }

    #[test]
    fn test_roundtrip_yaml() {
        let mut config = Config::default();
        config.api_url = Some("http://localhost:8000/api".to_string());
        config.session = Some(session(Utc::now() + chrono::Duration::hours(1)));

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.api_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(parsed.session.unwrap().username, "erin");
    }

    #[test]
    fn test_resolve_path_override() {
        let path = Config::resolve_path(Some("/tmp/traq.yaml")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/traq.yaml"));
    }
}
