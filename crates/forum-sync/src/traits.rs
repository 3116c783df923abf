//! Seams between the orchestrator and the forum API.

use async_trait::async_trait;
use changefeed_core::UserProfileChange;

use crate::error::{ForumSyncError, ProfileField, Result};
use crate::types::RemoteIdentity;

/// Looks up the forum account linked to a local user.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns `Ok(None)` when the user has no forum account. Every other
    /// failure is an error.
    async fn resolve(&self, local_user_id: i64) -> Result<Option<RemoteIdentity>>;
}

/// Applies profile field updates to a forum account.
#[async_trait]
pub trait ProfileSyncClient: Send + Sync {
    async fn update_username(
        &self,
        identity: &RemoteIdentity,
        change: &UserProfileChange,
    ) -> Result<()>;

    async fn update_email(
        &self,
        identity: &RemoteIdentity,
        change: &UserProfileChange,
    ) -> Result<()>;

    /// Pushes username then email.
    ///
    /// Each update is attempted regardless of the other's outcome. If either
    /// fails, the error lists every failed field.
    async fn apply_profile_change(
        &self,
        identity: &RemoteIdentity,
        change: &UserProfileChange,
    ) -> Result<()> {
        let mut failures = Vec::new();

        if let Err(err) = self.update_username(identity, change).await {
            failures.push((ProfileField::Username, err.to_string()));
        }
        if let Err(err) = self.update_email(identity, change).await {
            failures.push((ProfileField::Email, err.to_string()));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ForumSyncError::ProfileUpdate(failures))
        }
    }
}
