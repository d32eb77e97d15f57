use std::fmt;

/// Custom error type for slacksync operations
#[derive(Debug)]
pub enum SlackSyncError {
    /// Slack Web API related errors
    Slack(String),
    /// Jira REST API related errors
    Jira(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// JSON parsing errors
    Json(serde_json::Error),
    /// HTTP request errors
    Http(reqwest::Error),
    /// URL parsing errors
    Url(url::ParseError),
    /// Generic errors with message
    Generic(String),
}

impl fmt::Display for SlackSyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlackSyncError::Slack(msg) => write!(f, "Slack API error: {}", msg),
            SlackSyncError::Jira(msg) => write!(f, "Jira API error: {}", msg),
            SlackSyncError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SlackSyncError::Io(err) => write!(f, "I/O error: {}", err),
            SlackSyncError::Json(err) => write!(f, "JSON error: {}", err),
            SlackSyncError::Http(err) => write!(f, "HTTP error: {}", err),
            SlackSyncError::Url(err) => write!(f, "URL error: {}", err),
            SlackSyncError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SlackSyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SlackSyncError::Io(err) => Some(err),
            SlackSyncError::Json(err) => Some(err),
            SlackSyncError::Http(err) => Some(err),
            SlackSyncError::Url(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SlackSyncError {
    fn from(err: std::io::Error) -> Self {
        SlackSyncError::Io(err)
    }
}

impl From<serde_json::Error> for SlackSyncError {
    fn from(err: serde_json::Error) -> Self {
        SlackSyncError::Json(err)
    }
}

impl From<reqwest::Error> for SlackSyncError {
    fn from(err: reqwest::Error) -> Self {
        SlackSyncError::Http(err)
    }
}

impl From<url::ParseError> for SlackSyncError {
    fn from(err: url::ParseError) -> Self {
        SlackSyncError::Url(err)
    }
}

impl From<reqwest::header::InvalidHeaderValue> for SlackSyncError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        SlackSyncError::Generic(err.to_string())
    }
}

impl From<String> for SlackSyncError {
    fn from(err: String) -> Self {
        SlackSyncError::Generic(err)
    }
}

impl From<anyhow::Error> for SlackSyncError {
    fn from(err: anyhow::Error) -> Self {
        SlackSyncError::Generic(err.to_string())
    }
}

/// Result type alias for slacksync operations
pub type Result<T> = std::result::Result<T, SlackSyncError>;
