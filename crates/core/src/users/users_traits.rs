use super::UserProfileChange;

/// Trait for services that mirror user profile changes elsewhere.
///
/// Called on the mutation path, so implementations must return quickly and
/// must never fail the caller: outcomes are reported through logs only.
pub trait UserDataSyncService: Send + Sync {
    fn user_data_changed(&self, change: UserProfileChange);
}

/// Used when no external system is configured. Changes are discarded.
#[derive(Clone, Debug, Default)]
pub struct NoOpUserDataSync;

impl UserDataSyncService for NoOpUserDataSync {
    fn user_data_changed(&self, _change: UserProfileChange) {}
}
