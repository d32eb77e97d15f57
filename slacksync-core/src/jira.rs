//! Jira user profile client
//!
//! Looks up accounts by email through the user search endpoint and
//! overwrites the `metadata` user property with a member's Slack identity.
//! Per the error-handling design, lookup and write failures are logged with
//! status and body and surfaced as `None`/`false`; nothing propagates past
//! this boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use url::Url;

use crate::constants;
use crate::context::Context;
use crate::error::Result;
use crate::slack::DirectoryMember;
use crate::sync::Tracker;
use crate::throttle::Throttle;

/// Account record returned by the user search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraAccount {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Value stored under the `metadata` user property; fully overwritten on
/// each write, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProperty {
    pub slack_username: String,
    pub slack_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEnvelope {
    pub value: SyncProperty,
}

/// Authenticated Jira REST client (basic auth: account email + API token)
pub struct JiraClient {
    client: reqwest::Client,
    search_url: Url,
    property_url: Url,
    username: String,
    api_token: String,
    throttle: Throttle,
}

impl JiraClient {
    pub fn new(ctx: &Context, throttle: Throttle) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(constants::USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(ctx.api_timeout_secs))
            .build()?;

        let mut base = ctx.jira_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        Ok(JiraClient {
            client,
            search_url: base_url.join(constants::JIRA_SEARCH_PATH)?,
            property_url: base_url.join(constants::JIRA_PROPERTY_PATH)?,
            username: ctx.username.clone(),
            api_token: ctx.api_key.clone(),
            throttle,
        })
    }

    /// Search for a user by email and return the account ID if found.
    ///
    /// An empty result set is a normal outcome (logged, `None`); so is a
    /// transport or HTTP failure, which is logged with status and body and
    /// treated by callers as "not found" for this email.
    pub async fn find_account_by_email(&self, email: &str) -> Option<String> {
        self.throttle.wait().await;

        let response = self
            .client
            .get(self.search_url.clone())
            .basic_auth(&self.username, Some(&self.api_token))
            .query(&[("query", email), ("maxResults", "1")])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!("Failed to call search API: {}", err);
                return None;
            }
        };
        if !response.status().is_success() {
            wrap_error("Failed to call search API.", response).await;
            return None;
        }

        let accounts: Vec<JiraAccount> = match response.json().await {
            Ok(accounts) => accounts,
            Err(err) => {
                error!("Failed to parse search API response: {}", err);
                return None;
            }
        };

        match accounts.into_iter().next() {
            Some(account) => Some(account.account_id),
            None => {
                warn!("No user found for email: {}", email);
                None
            }
        }
    }

    /// Overwrite the account's `metadata` property with the member's Slack
    /// username and ID. Returns `true` on success; failures are logged
    /// (including the subject email) and return `false`.
    pub async fn write_sync_property(
        &self,
        account_id: &str,
        email: &str,
        member: &DirectoryMember,
    ) -> bool {
        self.throttle.wait().await;

        let property = SyncProperty {
            slack_username: member.name.clone(),
            slack_id: member.id.clone(),
        };

        let url = match self.property_url.join(constants::PROPERTY_KEY) {
            Ok(url) => url,
            Err(err) => {
                error!("Invalid property URL: {}", err);
                return false;
            }
        };

        let response = self
            .client
            .put(url)
            .basic_auth(&self.username, Some(&self.api_token))
            .query(&[("accountId", account_id)])
            .json(&property)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "Could not add property for account: {} ({}): {}",
                    account_id, email, err
                );
                return false;
            }
        };
        if !response.status().is_success() {
            wrap_error(
                &format!(
                    "Could not add property for account: {} ({})",
                    account_id, email
                ),
                response,
            )
            .await;
            return false;
        }

        info!(
            "User property `metadata.value.slack_id:{}, metadata.value.slack_username:{}` set for {}",
            property.slack_id, property.slack_username, account_id
        );
        true
    }

    /// Read back the stored Slack identity for an account, if any.
    /// Diagnostic accessor; the sync pass never calls this.
    pub async fn read_sync_property(&self, account_id: &str) -> Option<(String, String)> {
        self.throttle.wait().await;

        let url = match self.property_url.join(constants::PROPERTY_KEY) {
            Ok(url) => url,
            Err(err) => {
                error!("Invalid property URL: {}", err);
                return None;
            }
        };

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.api_token))
            .query(&[("accountId", account_id)])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "Could not find a slack_id/slack_username property for account: {}: {}",
                    account_id, err
                );
                return None;
            }
        };
        if !response.status().is_success() {
            wrap_error(
                &format!(
                    "Could not find a slack_id/slack_username property for account: {}",
                    account_id
                ),
                response,
            )
            .await;
            return None;
        }

        match response.json::<PropertyEnvelope>().await {
            Ok(envelope) => Some((envelope.value.slack_id, envelope.value.slack_username)),
            Err(err) => {
                error!(
                    "Could not find a slack_id/slack_username property for account: {}: {}",
                    account_id, err
                );
                None
            }
        }
    }
}

#[async_trait]
impl Tracker for JiraClient {
    async fn find_account_by_email(&self, email: &str) -> Option<String> {
        JiraClient::find_account_by_email(self, email).await
    }

    async fn write_sync_property(
        &self,
        account_id: &str,
        email: &str,
        member: &DirectoryMember,
    ) -> bool {
        JiraClient::write_sync_property(self, account_id, email, member).await
    }
}

/// Log an HTTP-level failure with its status code and response body
async fn wrap_error(message: &str, response: reqwest::Response) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!("{} [{}] {}", message, status, body);
}
