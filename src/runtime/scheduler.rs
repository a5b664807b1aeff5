//! Virtual-clock timer queue for highlight removal.
//!
//! Tasks are keyed by (element, class). Scheduling a key that is already
//! pending replaces the old deadline, so a repeated trigger keeps the class
//! for the full delay after the latest trigger instead of racing an earlier
//! timer. Time only moves when [`Scheduler::advance`] is called.

use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::dom::NodeId;

/// Identity of a pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskKey {
    pub node: NodeId,
    pub class: &'static str,
}

impl TaskKey {
    pub const fn new(node: NodeId, class: &'static str) -> Self {
        Self { node, class }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    /// Scheduling order, breaks ties between equal deadlines.
    seq: u64,
}

/// Pure scheduler: tracks deadlines, the caller performs the work.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: FxHashMap<TaskKey, Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `key` to fire after `delay`.
    ///
    /// Returns `true` if this superseded a pending task with the same key.
    pub fn schedule(&mut self, key: TaskKey, delay: Duration) -> bool {
        let pending = Pending {
            due: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let superseded = self.pending.insert(key, pending).is_some();
        if superseded {
            crate::debug!("timer"; "superseded pending task for {:?}", key);
        }
        superseded
    }

    /// Cancel a pending task. Returns whether one was pending.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Remaining time until `key` fires.
    pub fn remaining(&self, key: TaskKey) -> Option<Duration> {
        self.pending
            .get(&key)
            .map(|p| p.due.saturating_sub(self.now))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return every task that came due, ordered
    /// by deadline then scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<TaskKey> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<(TaskKey, Pending)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(k, p)| (*k, *p))
            .collect();
        due.sort_by_key(|(_, p)| (p.due, p.seq));

        for (key, _) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }

    /// Fire everything still pending, advancing the clock to the last deadline.
    pub fn run_until_idle(&mut self) -> Vec<TaskKey> {
        let last = self.pending.values().map(|p| p.due).max();
        match last {
            Some(last) => self.advance(last.saturating_sub(self.now)),
            None => Vec::new(),
        }
    }
}
