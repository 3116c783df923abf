use serde::{Deserialize, Serialize};

/// Snapshot of the user profile fields that are mirrored to external systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileChange {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl UserProfileChange {
    pub fn new(user_id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: email.into(),
        }
    }
}
