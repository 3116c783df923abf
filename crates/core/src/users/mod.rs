//! Users module - profile change model and the sync service trait.

mod users_model;
mod users_traits;

pub use users_model::UserProfileChange;
pub use users_traits::{NoOpUserDataSync, UserDataSyncService};
