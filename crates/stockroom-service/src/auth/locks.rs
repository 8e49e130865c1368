//! Per-account serialization of credential updates.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Async mutexes keyed by lower-cased email.
///
/// Holding an [`AccountGuard`] excludes every other signup, signin, or
/// signout for the same account within this process. Entries are dropped
/// once no task holds or waits on them.
#[derive(Debug, Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the account identified by `email`.
    pub async fn acquire(&self, email: &str) -> AccountGuard {
        let key = email.to_lowercase();
        let mutex = Arc::clone(&self.locks.entry(key.clone()).or_default());
        let guard = mutex.lock_owned().await;

        AccountGuard {
            key,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of accounts with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no account currently has a lock entry.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one account; released on drop.
#[derive(Debug)]
pub struct AccountGuard {
    key: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for AccountGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Waiters hold their own clone of the Arc, so a count of one means idle.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
