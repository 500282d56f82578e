//! Per-goal serialisation of balance-changing operations.

use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<i32, Arc<Mutex<()>>>;

/// One async mutex per goal id, created on first use and dropped once nobody
/// holds or waits for it.
#[derive(Default)]
pub struct GoalLocks {
    locks: Arc<LockTable>,
}

/// Guards held for the duration of one ledger operation.
pub struct GoalLockGuard {
    locks: Arc<LockTable>,
    guards: Vec<(i32, OwnedMutexGuard<()>)>,
}

impl GoalLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks every referenced goal in ascending id order.
    ///
    /// Taking the locks in a fixed order keeps two transfers between the same
    /// pair of goals from deadlocking on each other.
    pub async fn acquire<I>(&self, goal_ids: I) -> GoalLockGuard
    where
        I: IntoIterator<Item = i32>,
    {
        let ordered: BTreeSet<i32> = goal_ids.into_iter().collect();
        let mut guards = Vec::with_capacity(ordered.len());
        for goal_id in ordered {
            // Clone the Arc so the map shard is released before awaiting
            let lock = self.locks.entry(goal_id).or_default().clone();
            guards.push((goal_id, lock.lock_owned().await));
        }
        GoalLockGuard {
            locks: self.locks.clone(),
            guards,
        }
    }
}

impl Drop for GoalLockGuard {
    fn drop(&mut self) {
        for (goal_id, guard) in std::mem::take(&mut self.guards) {
            drop(guard);
            // Waiters hold their own clone, so only an idle entry has a count of one
            self.locks
                .remove_if(&goal_id, |_, lock| Arc::strong_count(lock) == 1);
        }
    }
}
