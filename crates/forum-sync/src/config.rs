//! Startup configuration for forum synchronization.

use std::time::Duration;

use crate::error::{ForumSyncError, Result};

/// Default timeout for forum API requests.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default admin account used for impersonation.
const DEFAULT_ADMIN_USER_ID: i64 = 1;

pub const ENV_MASTER_TOKEN: &str = "FORUM_SYNC_MASTER_TOKEN";
pub const ENV_BASE_URL: &str = "FORUM_SYNC_BASE_URL";
pub const ENV_ADMIN_USER_ID: &str = "FORUM_SYNC_ADMIN_USER_ID";
pub const ENV_ENABLED: &str = "FORUM_SYNC_ENABLED";
pub const ENV_TIMEOUT_MS: &str = "FORUM_SYNC_TIMEOUT_MS";

/// Process-wide forum settings, read once at startup.
#[derive(Clone)]
pub struct ForumSyncConfig {
    pub base_url: String,
    pub admin_user_id: i64,
    pub master_token: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ForumSyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForumSyncConfig")
            .field("base_url", &self.base_url)
            .field("admin_user_id", &self.admin_user_id)
            .field("master_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ForumSyncConfig {
    pub fn new(base_url: &str, admin_user_id: i64, master_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_user_id,
            master_token: master_token.into(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load settings from the process environment (and `.env`, if present).
    ///
    /// Returns `Ok(None)` when synchronization is switched off: no master
    /// token, or `FORUM_SYNC_ENABLED` set to false.
    pub fn from_env() -> Result<Option<Self>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(enabled) = get(ENV_ENABLED) {
            if !parse_flag(&enabled)? {
                return Ok(None);
            }
        }

        let Some(master_token) = get(ENV_MASTER_TOKEN) else {
            return Ok(None);
        };

        let base_url = get(ENV_BASE_URL).ok_or_else(|| {
            ForumSyncError::config(format!(
                "{} is required when {} is set",
                ENV_BASE_URL, ENV_MASTER_TOKEN
            ))
        })?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ForumSyncError::config(format!(
                "{} must be an http(s) URL, got '{}'",
                ENV_BASE_URL, base_url
            )));
        }

        let admin_user_id = match get(ENV_ADMIN_USER_ID) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                ForumSyncError::config(format!(
                    "{} must be an integer, got '{}'",
                    ENV_ADMIN_USER_ID, raw
                ))
            })?,
            None => DEFAULT_ADMIN_USER_ID,
        };

        let timeout_ms = match get(ENV_TIMEOUT_MS) {
            Some(raw) => raw.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                ForumSyncError::config(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_TIMEOUT_MS, raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Some(
            Self::new(&base_url, admin_user_id, master_token)
                .with_request_timeout(Duration::from_millis(timeout_ms)),
        ))
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ForumSyncError::config(format!(
            "{} must be a boolean, got '{}'",
            ENV_ENABLED, raw
        ))),
    }
}
