//! Virtual clock and deferred one-shot actions
//!
//! Actions due at the same time run in the order they were scheduled.

use std::collections::VecDeque;

/// Work deferred to a later tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Add a circle with this content
    Add(String),
    /// Switch elastic collisions off
    DisableDynamicCollision,
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: u64,
    action: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    now_ms: u64,
    /// Sorted by due time, FIFO within equal times
    pending: VecDeque<Entry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Schedule an action `delay_ms` from now, returning its due time
    pub fn after(&mut self, delay_ms: u64, action: Deferred) -> u64 {
        let due_ms = self.now_ms + delay_ms;
        let index = self.pending.partition_point(|e| e.due_ms <= due_ms);
        self.pending.insert(index, Entry { due_ms, action });
        due_ms
    }

    /// Next action whose due time has been reached
    pub fn pop_due(&mut self) -> Option<Deferred> {
        match self.pending.front() {
            Some(entry) if entry.due_ms <= self.now_ms => self.pending.pop_front().map(|e| e.action),
            _ => None,
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending action
    pub fn next_due(&self) -> Option<u64> {
        self.pending.front().map(|e| e.due_ms)
    }
}
