// Constants used throughout the slacksync system

// Slack Web API
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/";
pub const SLACK_USERS_LIST: &str = "users.list";
pub const SLACK_USERS_INFO: &str = "users.info";
// Pagination limit for Slack `users.list`
pub const SLACK_PAGINATION_LIMIT: u32 = 30;

// Jira REST API
pub const JIRA_SEARCH_PATH: &str = "rest/api/3/user/search";
pub const JIRA_PROPERTY_PATH: &str = "rest/api/3/user/properties/";
// Property key under which Slack identity metadata is stored
pub const PROPERTY_KEY: &str = "metadata";

// Delay in between API calls (we make multiple requests and do not want
// to exceed rate limits)
pub const API_DELAY_MS: u64 = 100;
// Timeout for API calls in seconds
pub const API_TIMEOUT_SECS: u64 = 60;

pub const USER_AGENT: &str = "slacksync-rust/1.0";
