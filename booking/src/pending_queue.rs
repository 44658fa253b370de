//! FIFO queue of accepted bookings awaiting settlement.

use crate::types::PendingRecord;
use std::collections::VecDeque;

/// Unbounded first-in-first-out queue backed by a ring buffer.
///
/// Enqueue and dequeue are both O(1).
#[derive(Clone, Debug, Default)]
pub struct PendingQueue {
    records: VecDeque<PendingRecord>,
}

impl PendingQueue {
    /// Creates an empty queue
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }

    /// Append a record at the tail
    pub fn enqueue(&mut self, record: PendingRecord) {
        self.records.push_back(record);
    }

    /// Remove and return the head, or `None` when empty
    pub fn dequeue(&mut self) -> Option<PendingRecord> {
        self.records.pop_front()
    }

    /// Returns true if nothing is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of waiting records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Waiting records, head first, without removing them
    pub fn iter(&self) -> impl Iterator<Item = &PendingRecord> {
        self.records.iter()
    }
}
