//! Types for forum API requests and responses.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Identity Types
// ─────────────────────────────────────────────────────────────────────────────

/// The forum account linked to a local user.
///
/// Resolved fresh for every sync attempt; the forum is the only source of
/// truth for the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteIdentity {
    pub external_user_id: i64,
    pub external_username: String,
}

/// Response from the SSO plugin's user lookup.
///
/// GET /api/v3/plugins/sso/user/{localUserId}
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserLookupResponse {
    /// Forum user id; null when the SSO link exists without an account
    pub uid: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

impl UserLookupResponse {
    pub(crate) fn into_identity(self) -> Option<RemoteIdentity> {
        let external_user_id = self.uid?;
        Some(RemoteIdentity {
            external_user_id,
            external_username: self.username.unwrap_or_default(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Update Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Body of PUT /api/v3/users/{uid}.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UsernameUpdate<'a> {
    /// User to impersonate for the call (the admin account)
    #[serde(rename = "_uid")]
    pub uid: &'a str,
    pub username: &'a str,
}

/// Body of POST /api/v3/users/{uid}/emails.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmailUpdate<'a> {
    /// User to impersonate for the call (the admin account)
    #[serde(rename = "_uid")]
    pub uid: &'a str,
    pub email: &'a str,
    /// Must always be 1
    pub skip_confirmation: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_with_uid() {
        let response: UserLookupResponse =
            serde_json::from_str(r#"{"uid": 17, "username": "alice", "extra": true}"#).unwrap();
        assert_eq!(
            response.into_identity(),
            Some(RemoteIdentity {
                external_user_id: 17,
                external_username: "alice".to_string(),
            })
        );
    }

    #[test]
    fn test_lookup_with_null_uid() {
        let response: UserLookupResponse =
            serde_json::from_str(r#"{"uid": null, "username": "alice"}"#).unwrap();
        assert_eq!(response.into_identity(), None);
    }

    #[test]
    fn test_email_update_wire_format() {
        let body = serde_json::to_value(EmailUpdate {
            uid: "1",
            email: "a2@example.com",
            skip_confirmation: 1,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"_uid": "1", "email": "a2@example.com", "skipConfirmation": 1})
        );
    }
}
