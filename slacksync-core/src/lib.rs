//! slacksync Core Library
//!
//! This library contains the core functionality for slacksync, a batch job
//! that synchronizes Slack workspace identities into Jira user properties.
//! It provides the configuration context, error types, the Slack directory
//! reader, the Jira tracker client and the sync orchestration used by the
//! CLI tools.

pub mod constants;
pub mod context;
pub mod error;
pub mod jira;
pub mod slack;
pub mod sync;
pub mod throttle;

// Re-export commonly used items
pub use context::Context;
pub use error::{Result, SlackSyncError};
pub use jira::JiraClient;
pub use slack::{DirectoryIndex, DirectoryMember, SlackDirectory};
pub use sync::{sync_directory, SyncStats, Tracker};
pub use throttle::Throttle;
