//! Slack workspace directory reader
//!
//! Enumerates workspace members page by page through the Slack Web API,
//! filters out bots, deactivated accounts and members without an email
//! address, and merges the survivors into one email-keyed index.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::constants;
use crate::context::Context;
use crate::error::{Result, SlackSyncError};
use crate::throttle::Throttle;

/// One qualifying workspace member: mentionable handle plus opaque Slack ID.
/// Exists only in memory for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryMember {
    pub name: String,
    pub id: String,
}

/// Mapping from email to member data; one entry per email, later pages
/// overwrite earlier duplicates.
pub type DirectoryIndex = HashMap<String, DirectoryMember>;

/// Member record as returned by `users.list` / `users.info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackUser {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
    pub deleted: bool,
    pub profile: SlackProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackProfile {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersListResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub members: Vec<SlackUser>,
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersInfoResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub user: Option<SlackUser>,
}

/// Merge one page of member records into the index, dropping bots,
/// deactivated accounts and records without an email. Last write wins on
/// duplicate emails across pages.
pub fn merge_page(index: &mut DirectoryIndex, users: Vec<SlackUser>) {
    for user in users {
        if user.is_bot || user.deleted {
            continue;
        }
        if let Some(email) = user.profile.email {
            index.insert(
                email,
                DirectoryMember {
                    name: user.name,
                    id: user.id,
                },
            );
        }
    }
}

/// Authenticated Slack Web API client for the workspace directory
pub struct SlackDirectory {
    client: reqwest::Client,
    base_url: Url,
    page_limit: u32,
    throttle: Throttle,
}

impl SlackDirectory {
    pub fn new(ctx: &Context, throttle: Throttle) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", ctx.slack_token))?,
        );
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(constants::USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(ctx.api_timeout_secs))
            .build()?;

        let mut base = ctx.slack_api_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(SlackDirectory {
            client,
            base_url: Url::parse(&base)?,
            page_limit: ctx.page_limit,
            throttle,
        })
    }

    /// Fetch the full workspace membership as an email-keyed index.
    ///
    /// Loops over `users.list` until the continuation cursor comes back
    /// empty. An empty index is a normal terminal condition, not an error.
    pub async fn fetch_all_members(&self) -> Result<DirectoryIndex> {
        let mut index = DirectoryIndex::new();

        let (users, mut cursor) = self.fetch_page(None).await?;
        merge_page(&mut index, users);

        while !cursor.is_empty() {
            let (users, next_cursor) = self.fetch_page(Some(&cursor)).await?;
            merge_page(&mut index, users);
            cursor = next_cursor;
        }

        Ok(index)
    }

    /// Fetch a single member by Slack ID, applying the same filter as the
    /// full listing. Yields an index of size 0 or 1.
    pub async fn fetch_one_member(&self, member_id: &str) -> Result<DirectoryIndex> {
        self.throttle.wait().await;

        let url = self.base_url.join(constants::SLACK_USERS_INFO)?;
        let response = self
            .client
            .get(url)
            .query(&[("user", member_id)])
            .send()
            .await?
            .error_for_status()?;

        let info: UsersInfoResponse = response.json().await?;
        if !info.ok {
            return Err(SlackSyncError::Slack(
                info.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let mut index = DirectoryIndex::new();
        if let Some(user) = info.user {
            merge_page(&mut index, vec![user]);
        }
        Ok(index)
    }

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<(Vec<SlackUser>, String)> {
        self.throttle.wait().await;
        debug!("Getting next {} members...", self.page_limit);

        let url = self.base_url.join(constants::SLACK_USERS_LIST)?;
        let mut request = self
            .client
            .get(url)
            .query(&[("limit", self.page_limit.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await?.error_for_status()?;
        let page: UsersListResponse = response.json().await?;
        if !page.ok {
            return Err(SlackSyncError::Slack(
                page.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let next_cursor = page
            .response_metadata
            .map(|meta| meta.next_cursor)
            .unwrap_or_default();
        Ok((page.members, next_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, email: Option<&str>, is_bot: bool, deleted: bool) -> SlackUser {
        SlackUser {
            id: id.to_string(),
            name: name.to_string(),
            is_bot,
            deleted,
            profile: SlackProfile {
                email: email.map(str::to_string),
            },
        }
    }

    #[test]
    fn merge_drops_bots_deleted_and_emailless() {
        let mut index = DirectoryIndex::new();
        merge_page(
            &mut index,
            vec![
                user("U1", "alice", Some("alice@example.com"), false, false),
                user("U2", "robo", Some("robo@example.com"), true, false),
                user("U3", "gone", Some("gone@example.com"), false, true),
                user("U4", "ghost", None, false, false),
            ],
        );

        assert_eq!(index.len(), 1);
        assert_eq!(
            index["alice@example.com"],
            DirectoryMember {
                name: "alice".to_string(),
                id: "U1".to_string(),
            }
        );
    }

    #[test]
    fn later_page_wins_on_duplicate_email() {
        let mut index = DirectoryIndex::new();
        merge_page(
            &mut index,
            vec![user("U1", "alice", Some("alice@example.com"), false, false)],
        );
        merge_page(
            &mut index,
            vec![user("U9", "alice.new", Some("alice@example.com"), false, false)],
        );

        assert_eq!(index.len(), 1);
        assert_eq!(
            index["alice@example.com"],
            DirectoryMember {
                name: "alice.new".to_string(),
                id: "U9".to_string(),
            }
        );
    }

    #[test]
    fn two_pages_of_qualifying_members_merge_to_one_index() {
        // 2 members on the first page, 1 on the second, all passing filters
        let mut index = DirectoryIndex::new();
        merge_page(
            &mut index,
            vec![
                user("U1", "alice", Some("alice@example.com"), false, false),
                user("U2", "bob", Some("bob@example.com"), false, false),
            ],
        );
        merge_page(
            &mut index,
            vec![user("U3", "carol", Some("carol@example.com"), false, false)],
        );

        assert_eq!(index.len(), 3);
    }

    #[test]
    fn users_list_page_parses() {
        let body = r#"{
            "ok": true,
            "members": [
                {
                    "id": "U023BECGF",
                    "name": "bobby",
                    "deleted": false,
                    "is_bot": false,
                    "profile": {"email": "bobby@example.com"}
                },
                {
                    "id": "B061F7JD2",
                    "name": "importer",
                    "deleted": false,
                    "is_bot": true,
                    "profile": {}
                }
            ],
            "response_metadata": {"next_cursor": "dXNlcjpVMEc5V0ZYTlo="}
        }"#;

        let page: UsersListResponse = serde_json::from_str(body).unwrap();
        assert!(page.ok);
        assert_eq!(page.members.len(), 2);
        assert_eq!(
            page.members[0].profile.email.as_deref(),
            Some("bobby@example.com")
        );
        assert!(page.members[1].is_bot);
        assert_eq!(
            page.response_metadata.unwrap().next_cursor,
            "dXNlcjpVMEc5V0ZYTlo="
        );
    }

    #[test]
    fn missing_response_metadata_means_no_more_pages() {
        let body = r#"{"ok": true, "members": []}"#;
        let page: UsersListResponse = serde_json::from_str(body).unwrap();
        let cursor = page
            .response_metadata
            .map(|meta| meta.next_cursor)
            .unwrap_or_default();
        assert!(cursor.is_empty());
    }

    #[test]
    fn error_envelope_parses() {
        let body = r#"{"ok": false, "error": "invalid_auth"}"#;
        let page: UsersListResponse = serde_json::from_str(body).unwrap();
        assert!(!page.ok);
        assert_eq!(page.error.as_deref(), Some("invalid_auth"));
    }
}
