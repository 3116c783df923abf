//! Resolve-then-apply orchestration and its error boundary.

use std::sync::Arc;

use changefeed_core::UserProfileChange;
use log::{debug, error, info};

use crate::client::ForumClient;
use crate::error::Result;
use crate::traits::{IdentityResolver, ProfileSyncClient};
use crate::types::RemoteIdentity;

/// Terminal state of one sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Username and email were applied to the forum account.
    Synced,
    /// The user has no forum account.
    Skipped,
    /// Resolution or an update failed. Already logged.
    Failed,
}

/// Drives one profile change through identity resolution and profile sync.
///
/// Attempts are single-pass: no retries, no intermediate state kept.
pub struct SyncOrchestrator {
    resolver: Arc<dyn IdentityResolver>,
    profiles: Arc<dyn ProfileSyncClient>,
}

impl SyncOrchestrator {
    pub fn new(
        resolver: Arc<dyn IdentityResolver>,
        profiles: Arc<dyn ProfileSyncClient>,
    ) -> Self {
        Self { resolver, profiles }
    }

    /// Orchestrator backed by a single forum client for both roles.
    pub fn with_client(client: ForumClient) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client)
    }

    /// Error boundary for the whole sync path.
    ///
    /// Every failure is logged here and turned into [`SyncOutcome::Failed`];
    /// nothing is returned to the code that reported the profile change.
    pub async fn sync_user(&self, change: &UserProfileChange) -> SyncOutcome {
        debug!("Forum sync received for user {}", change.user_id);

        match self.resolve_and_apply(change).await {
            Ok(Some(identity)) => {
                info!(
                    "User data updated in forum (uid {}): username={}, email={}",
                    identity.external_user_id, change.username, change.email
                );
                SyncOutcome::Synced
            }
            Ok(None) => {
                info!("User data not updated in forum (user not found): {:?}", change);
                SyncOutcome::Skipped
            }
            Err(err) => {
                error!("Updating user data in forum failed: {:?}: {}", change, err);
                SyncOutcome::Failed
            }
        }
    }

    async fn resolve_and_apply(
        &self,
        change: &UserProfileChange,
    ) -> Result<Option<RemoteIdentity>> {
        debug!("Resolving forum identity for user {}", change.user_id);
        let Some(identity) = self.resolver.resolve(change.user_id).await? else {
            return Ok(None);
        };

        self.profiles.apply_profile_change(&identity, change).await?;
        Ok(Some(identity))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{ForumSyncError, ProfileField};

    struct StubResolver {
        result: fn() -> Result<Option<RemoteIdentity>>,
    }

    #[async_trait]
    impl IdentityResolver for StubResolver {
        async fn resolve(&self, _local_user_id: i64) -> Result<Option<RemoteIdentity>> {
            (self.result)()
        }
    }

    #[derive(Default)]
    struct RecordingProfiles {
        fail_username: bool,
        fail_email: bool,
        calls: Mutex<Vec<ProfileField>>,
    }

    #[async_trait]
    impl ProfileSyncClient for RecordingProfiles {
        async fn update_username(
            &self,
            _identity: &RemoteIdentity,
            _change: &UserProfileChange,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(ProfileField::Username);
            if self.fail_username {
                return Err(ForumSyncError::api(500, "boom"));
            }
            Ok(())
        }

        async fn update_email(
            &self,
            _identity: &RemoteIdentity,
            _change: &UserProfileChange,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(ProfileField::Email);
            if self.fail_email {
                return Err(ForumSyncError::api(500, "boom"));
            }
            Ok(())
        }
    }

    fn found() -> Result<Option<RemoteIdentity>> {
        Ok(Some(RemoteIdentity {
            external_user_id: 17,
            external_username: "alice".to_string(),
        }))
    }

    fn change() -> UserProfileChange {
        UserProfileChange::new(5, "alice2", "a2@example.com")
    }

    fn orchestrator(
        result: fn() -> Result<Option<RemoteIdentity>>,
        profiles: Arc<RecordingProfiles>,
    ) -> SyncOrchestrator {
        SyncOrchestrator::new(Arc::new(StubResolver { result }), profiles)
    }

    #[tokio::test]
    async fn test_found_identity_is_synced() {
        let profiles = Arc::new(RecordingProfiles::default());
        let outcome = orchestrator(found, profiles.clone())
            .sync_user(&change())
            .await;

        assert_eq!(outcome, SyncOutcome::Synced);
        assert_eq!(
            *profiles.calls.lock().unwrap(),
            vec![ProfileField::Username, ProfileField::Email]
        );
    }

    #[tokio::test]
    async fn test_missing_identity_is_skipped() {
        let profiles = Arc::new(RecordingProfiles::default());
        let outcome = orchestrator(|| Ok(None), profiles.clone())
            .sync_user(&change())
            .await;

        assert_eq!(outcome, SyncOutcome::Skipped);
        assert!(profiles.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolution_error_is_absorbed() {
        let profiles = Arc::new(RecordingProfiles::default());
        let outcome = orchestrator(|| Err(ForumSyncError::api(503, "down")), profiles.clone())
            .sync_user(&change())
            .await;

        assert_eq!(outcome, SyncOutcome::Failed);
        assert!(profiles.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_username_failure_still_attempts_email() {
        let profiles = Arc::new(RecordingProfiles {
            fail_username: true,
            ..Default::default()
        });
        let outcome = orchestrator(found, profiles.clone())
            .sync_user(&change())
            .await;

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(
            *profiles.calls.lock().unwrap(),
            vec![ProfileField::Username, ProfileField::Email]
        );
    }

    #[tokio::test]
    async fn test_apply_reports_every_failed_field() {
        let profiles = RecordingProfiles {
            fail_username: true,
            fail_email: true,
            ..Default::default()
        };
        let identity = found().unwrap().unwrap();

        let err = profiles
            .apply_profile_change(&identity, &change())
            .await
            .unwrap_err();

        match err {
            ForumSyncError::ProfileUpdate(failures) => {
                let fields: Vec<ProfileField> = failures.iter().map(|(f, _)| *f).collect();
                assert_eq!(fields, vec![ProfileField::Username, ProfileField::Email]);
            }
            other => panic!("Expected ProfileUpdate, got {:?}", other),
        }
    }
}
