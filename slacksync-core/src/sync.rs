//! Sync orchestration
//!
//! A single linear pass over the directory index: look up each member's
//! Jira account by email, then overwrite its Slack identity property.
//! Per-member outcomes are independent; the counters are the only
//! aggregate signal of partial failure.

use async_trait::async_trait;
use tracing::info;

use crate::slack::{DirectoryIndex, DirectoryMember};

/// The tracker-side operations the orchestrator drives. `JiraClient`
/// implements this; tests substitute an in-memory fake.
///
/// Both operations contain their own failures: an absent account and a
/// transport error both come back as `None`/`false`, already logged.
#[async_trait]
pub trait Tracker {
    async fn find_account_by_email(&self, email: &str) -> Option<String>;

    async fn write_sync_property(
        &self,
        account_id: &str,
        email: &str,
        member: &DirectoryMember,
    ) -> bool;
}

/// Counters accumulated over one sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub total_members: usize,
    pub accounts_found: usize,
    pub properties_updated: usize,
}

/// Run the sync pass: two tracker calls per directory entry, skipping
/// members with no matching account and continuing past failed writes.
pub async fn sync_directory<T: Tracker>(index: &DirectoryIndex, tracker: &T) -> SyncStats {
    let mut stats = SyncStats {
        total_members: index.len(),
        ..SyncStats::default()
    };

    for (email, member) in index {
        let Some(account_id) = tracker.find_account_by_email(email).await else {
            continue;
        };

        stats.accounts_found += 1;
        info!("Found account ID: {} for user: {}", account_id, email);

        if tracker.write_sync_property(&account_id, email, member).await {
            stats.properties_updated += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeTracker {
        // email -> account ID known to the tracker
        accounts: HashMap<String, String>,
        fail_writes: bool,
        finds: Mutex<usize>,
        writes: Mutex<Vec<(String, String)>>,
    }

    impl FakeTracker {
        fn new(accounts: &[(&str, &str)]) -> Self {
            FakeTracker {
                accounts: accounts
                    .iter()
                    .map(|(email, id)| (email.to_string(), id.to_string()))
                    .collect(),
                fail_writes: false,
                finds: Mutex::new(0),
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Tracker for FakeTracker {
        async fn find_account_by_email(&self, email: &str) -> Option<String> {
            *self.finds.lock().unwrap() += 1;
            self.accounts.get(email).cloned()
        }

        async fn write_sync_property(
            &self,
            account_id: &str,
            email: &str,
            _member: &DirectoryMember,
        ) -> bool {
            self.writes
                .lock()
                .unwrap()
                .push((account_id.to_string(), email.to_string()));
            !self.fail_writes
        }
    }

    fn index(entries: &[(&str, &str, &str)]) -> DirectoryIndex {
        entries
            .iter()
            .map(|(email, name, id)| {
                (
                    email.to_string(),
                    DirectoryMember {
                        name: name.to_string(),
                        id: id.to_string(),
                    },
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn two_of_three_members_matched_and_updated() {
        let index = index(&[
            ("alice@example.com", "alice", "U1"),
            ("bob@example.com", "bob", "U2"),
            ("carol@example.com", "carol", "U3"),
        ]);
        let tracker = FakeTracker::new(&[
            ("alice@example.com", "acc-1"),
            ("bob@example.com", "acc-2"),
        ]);

        let stats = sync_directory(&index, &tracker).await;

        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.accounts_found, 2);
        assert_eq!(stats.properties_updated, 2);
        // The unmatched member was looked up but never written
        assert_eq!(*tracker.finds.lock().unwrap(), 3);
        assert_eq!(tracker.writes.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_write_keeps_account_counted() {
        let index = index(&[("alice@example.com", "alice", "U1")]);
        let mut tracker = FakeTracker::new(&[("alice@example.com", "acc-1")]);
        tracker.fail_writes = true;

        let stats = sync_directory(&index, &tracker).await;

        assert_eq!(stats.accounts_found, 1);
        assert_eq!(stats.properties_updated, 0);
    }

    #[tokio::test]
    async fn unmatched_member_increments_nothing() {
        let index = index(&[("nobody@example.com", "nobody", "U9")]);
        let tracker = FakeTracker::new(&[]);

        let stats = sync_directory(&index, &tracker).await;

        assert_eq!(stats.total_members, 1);
        assert_eq!(stats.accounts_found, 0);
        assert_eq!(stats.properties_updated, 0);
        assert!(tracker.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_index_makes_no_tracker_calls() {
        let index = DirectoryIndex::new();
        let tracker = FakeTracker::new(&[("alice@example.com", "acc-1")]);

        let stats = sync_directory(&index, &tracker).await;

        assert_eq!(stats, SyncStats::default());
        assert_eq!(*tracker.finds.lock().unwrap(), 0);
        assert!(tracker.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_yield_identical_counters() {
        let index = index(&[
            ("alice@example.com", "alice", "U1"),
            ("bob@example.com", "bob", "U2"),
        ]);
        let tracker = FakeTracker::new(&[
            ("alice@example.com", "acc-1"),
            ("bob@example.com", "acc-2"),
        ]);

        let first = sync_directory(&index, &tracker).await;
        let second = sync_directory(&index, &tracker).await;

        assert_eq!(first, second);
    }
}
