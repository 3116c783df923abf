//! Changefeed Forum Sync - best-effort user profile mirroring to the forum.
//!
//! Resolves a local user to the linked forum account and pushes the changed
//! username and email, impersonating the configured admin account. Failures
//! are logged and never reach the code that reported the change.
//!
//! # Usage
//!
//! ```rust,ignore
//! use changefeed_forum_sync::{build_user_data_sync, ForumSyncConfig};
//! use changefeed_core::UserProfileChange;
//!
//! let config = ForumSyncConfig::from_env()?;
//! let sync = build_user_data_sync(config.as_ref())?;
//! sync.user_data_changed(UserProfileChange::new(42, "alice2", "a2@example.com"));
//! ```

mod client;
mod config;
mod error;
mod orchestrator;
mod sink;
mod traits;
mod types;

pub use client::ForumClient;
pub use config::*;
pub use error::{ForumSyncError, ProfileField, Result};
pub use orchestrator::{SyncOrchestrator, SyncOutcome};
pub use sink::{build_user_data_sync, ForumSyncSink};
pub use traits::{IdentityResolver, ProfileSyncClient};
pub use types::RemoteIdentity;
