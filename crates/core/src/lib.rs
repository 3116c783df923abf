//! Changefeed Core - entity lifecycle notifications and cache invalidation.
//!
//! This crate holds the in-process half of change propagation: the notifier
//! the persistence layer calls after each commit, the cache registry and
//! invalidation policy, and the user profile types shared with the external
//! sync crates. It performs no I/O of its own.

pub mod cache;
pub mod errors;
pub mod events;
pub mod users;

pub use cache::{CacheInvalidationPolicy, CacheRegistry, CacheStore, InMemoryCacheStore};
pub use events::{
    ChangeKind, EntityChangeHandler, EntityChangeNotification, EntityType, LifecycleNotifier,
};
pub use users::{UserDataSyncService, UserProfileChange};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
