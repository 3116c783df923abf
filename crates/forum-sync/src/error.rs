//! Error types for the forum sync crate.

use thiserror::Error;

/// Result type alias for forum sync operations.
pub type Result<T> = std::result::Result<T, ForumSyncError>;

/// Profile field pushed to the forum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileField::Username => f.write_str("username"),
            ProfileField::Email => f.write_str("email"),
        }
    }
}

/// Errors that can occur while talking to the forum.
#[derive(Debug, Error)]
pub enum ForumSyncError {
    /// HTTP client error (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status from the forum API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Master token cannot be used as a header value
    #[error("Authentication error: {0}")]
    Auth(String),

    /// One or more profile field updates failed
    #[error("Profile update failed for {}", describe_failures(.0))]
    ProfileUpdate(Vec<(ProfileField, String)>),
}

impl ForumSyncError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn describe_failures(failures: &[(ProfileField, String)]) -> String {
    failures
        .iter()
        .map(|(field, message)| format!("{} ({})", field, message))
        .collect::<Vec<_>>()
        .join(", ")
}
