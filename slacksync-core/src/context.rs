use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, SlackSyncError};

/// Environment context packed in structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    // From SLACK_TOKEN, required - bearer credential for the Slack workspace
    pub slack_token: String,

    // From JIRA_URL, required - base URL of the Jira server
    pub jira_url: String,

    // From USERNAME, required - Atlassian account email used for basic auth
    pub username: String,

    // From APIKEY, required - Jira API token used as the basic-auth password
    pub api_key: String,

    // From SLACK_API_URL, default "https://slack.com/api/"
    pub slack_api_url: String,

    // From SYNC_PAGE_LIMIT, Slack `users.list` pagination limit, default 30
    pub page_limit: u32,

    // From SYNC_API_DELAY_MS, delay in between API calls, default 100
    pub api_delay_ms: u64,

    // From SYNC_API_TIMEOUT, per-request timeout in seconds, default 60
    pub api_timeout_secs: u64,

    // From SYNC_CTXOUT, output all context data (this struct), default false
    pub ctx_out: bool,
}

fn required(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SlackSyncError::Config(format!("{} environment variable is required", key)))
}

impl Context {
    /// Load context from environment variables.
    ///
    /// The four credentials (`SLACK_TOKEN`, `JIRA_URL`, `USERNAME`, `APIKEY`)
    /// are required and missing any of them is a fatal configuration error,
    /// surfaced before any remote call is made.
    pub fn from_env() -> Result<Self> {
        let slack_token = required("SLACK_TOKEN")?;
        let jira_url = required("JIRA_URL")?;
        let username = required("USERNAME")?;
        let api_key = required("APIKEY")?;

        let mut ctx = Context {
            slack_token,
            jira_url,
            username,
            api_key,
            slack_api_url: constants::DEFAULT_SLACK_API_URL.to_string(),
            page_limit: constants::SLACK_PAGINATION_LIMIT,
            api_delay_ms: constants::API_DELAY_MS,
            api_timeout_secs: constants::API_TIMEOUT_SECS,
            ctx_out: false,
        };

        if let Ok(slack_api_url) = std::env::var("SLACK_API_URL") {
            ctx.slack_api_url = slack_api_url;
        }

        if let Ok(page_limit) = std::env::var("SYNC_PAGE_LIMIT") {
            ctx.page_limit = page_limit.parse().unwrap_or(constants::SLACK_PAGINATION_LIMIT);
        }

        if let Ok(delay) = std::env::var("SYNC_API_DELAY_MS") {
            ctx.api_delay_ms = delay.parse().unwrap_or(constants::API_DELAY_MS);
        }

        if let Ok(timeout) = std::env::var("SYNC_API_TIMEOUT") {
            ctx.api_timeout_secs = timeout.parse().unwrap_or(constants::API_TIMEOUT_SECS);
        }

        ctx.ctx_out = std::env::var("SYNC_CTXOUT").is_ok();

        Ok(ctx)
    }
}
