//! Error types for the Traq CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for Traq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Client-side validation failure, raised before any request is sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `traq login` to sign in.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server-side state conflict, e.g. starting a timer while one is
    /// already running.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    /// Whether a stale cache entry may be served in place of this error
    /// (stale-while-error). Auth and client errors must surface directly.
    pub fn allows_stale(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::ServerError(_) | ApiError::RateLimit(_)
        )
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `traq login` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Not signed in. Run `traq login` to authenticate.")]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("traq login"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("Task 42".to_string());
        assert!(err.to_string().contains("Task 42"));
    }

    #[test]
    fn test_api_error_conflict() {
        let err = ApiError::Conflict("A timer is already running".to_string());
        assert!(err.to_string().contains("already running"));
    }

    #[test]
    fn test_api_error_rate_limit() {
        let err = ApiError::RateLimit(Duration::from_secs(30));
        let msg = err.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_allows_stale() {
        assert!(ApiError::Network("down".into()).allows_stale());
        assert!(ApiError::ServerError("500".into()).allows_stale());
        assert!(!ApiError::Unauthorized.allows_stale());
        assert!(!ApiError::Conflict("busy".into()).allows_stale());
        assert!(!ApiError::BadRequest("bad".into()).allows_stale());
    }

    #[test]
    fn test_config_error_missing_credentials() {
        let err = ConfigError::MissingCredentials;
        assert!(err.to_string().contains("traq login"));
    }

    #[test]
    fn test_validation_error_message() {
        let err = Error::Validation("end_time must be after start_time".to_string());
        assert!(err.to_string().contains("end_time"));
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::Unauthorized;
        let err: Error = api_err.into();

        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
