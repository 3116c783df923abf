//! Forum API client for identity lookup and profile updates.
//!
//! Every call is made as the configured admin account: the master token goes
//! in the `Authorization` header and the admin id in the `_uid` parameter.

use async_trait::async_trait;
use changefeed_core::UserProfileChange;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;

use crate::config::ForumSyncConfig;
use crate::error::{ForumSyncError, Result};
use crate::traits::{IdentityResolver, ProfileSyncClient};
use crate::types::{EmailUpdate, RemoteIdentity, UserLookupResponse, UsernameUpdate};

/// Value the forum expects in `skipConfirmation` to apply an email change
/// without a verification round trip.
const SKIP_CONFIRMATION: u8 = 1;

/// A payload paired with the admin bearer credential.
///
/// Built fresh for every call and consumed when applied.
pub(crate) struct AuthorizedRequest<T> {
    payload: Option<T>,
    headers: HeaderMap,
}

impl<T: Serialize> AuthorizedRequest<T> {
    pub(crate) fn new(master_token: &str, payload: Option<T>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", master_token))
            .map_err(|_| ForumSyncError::auth("Invalid master token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(Self { payload, headers })
    }

    pub(crate) fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.headers(self.headers);
        match self.payload {
            Some(payload) => builder.json(&payload),
            None => builder,
        }
    }
}

/// Client for the forum's REST API.
#[derive(Clone)]
pub struct ForumClient {
    client: reqwest::Client,
    base_url: String,
    admin_user_id: String,
    master_token: String,
}

impl ForumClient {
    /// Create a client from startup configuration.
    ///
    /// The configured timeout applies to every request made by this client.
    pub fn new(config: &ForumSyncConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            admin_user_id: config.admin_user_id.to_string(),
            master_token: config.master_token.clone(),
        })
    }

    fn authorized<T: Serialize>(&self, payload: Option<T>) -> Result<AuthorizedRequest<T>> {
        AuthorizedRequest::new(&self.master_token, payload)
    }

    /// Fail on a non-success status; the body of a success is ignored.
    async fn expect_success(response: reqwest::Response, action: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ForumSyncError::api(
            status.as_u16(),
            format!("{} failed: {}", action, body),
        ))
    }
}

#[async_trait]
impl IdentityResolver for ForumClient {
    /// GET /api/v3/plugins/sso/user/{localUserId}?_uid={adminId}
    ///
    /// This endpoint is provided by the SSO plugin, not by the forum core.
    async fn resolve(&self, local_user_id: i64) -> Result<Option<RemoteIdentity>> {
        let url = format!(
            "{}/api/v3/plugins/sso/user/{}",
            self.base_url, local_user_id
        );

        let response = self
            .authorized::<()>(None)?
            .apply(
                self.client
                    .get(&url)
                    .query(&[("_uid", self.admin_user_id.as_str())]),
            )
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(
                "User id {} not found in forum. Probably the user never logged in there and has no account there.",
                local_user_id
            );
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ForumSyncError::api(
                status.as_u16(),
                format!("User lookup failed: {}", body),
            ));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }

        let lookup: Option<UserLookupResponse> = serde_json::from_str(&body)?;
        Ok(lookup.and_then(UserLookupResponse::into_identity))
    }
}

#[async_trait]
impl ProfileSyncClient for ForumClient {
    /// PUT /api/v3/users/{uid}
    async fn update_username(
        &self,
        identity: &RemoteIdentity,
        change: &UserProfileChange,
    ) -> Result<()> {
        let url = format!("{}/api/v3/users/{}", self.base_url, identity.external_user_id);
        let update = UsernameUpdate {
            uid: &self.admin_user_id,
            username: &change.username,
        };

        let response = self
            .authorized(Some(update))?
            .apply(self.client.put(&url))
            .send()
            .await?;

        Self::expect_success(response, "Username update").await?;
        debug!("Username updated in forum: {:?}", change);
        Ok(())
    }

    /// POST /api/v3/users/{uid}/emails
    async fn update_email(
        &self,
        identity: &RemoteIdentity,
        change: &UserProfileChange,
    ) -> Result<()> {
        let url = format!(
            "{}/api/v3/users/{}/emails",
            self.base_url, identity.external_user_id
        );
        let update = EmailUpdate {
            uid: &self.admin_user_id,
            email: &change.email,
            skip_confirmation: SKIP_CONFIRMATION,
        };

        let response = self
            .authorized(Some(update))?
            .apply(self.client.post(&url))
            .send()
            .await?;

        Self::expect_success(response, "Email update").await?;
        debug!("Email updated in forum: {:?}", change);
        Ok(())
    }
}
