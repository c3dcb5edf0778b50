//! Prefetch Issue Queue.
//!
//! A bounded FIFO tracking recently issued prefetches. Each entry maps a
//! cache line back to the stream that requested it, together with a bit
//! recording whether the line has since been filled into the cache. The
//! queue is the source of truth for three questions:
//! * Was this line prefetched recently, and by which stream? (usefulness)
//! * Had the prefetch landed before the demand access arrived? (timeliness)
//! * Is a projected line already in flight? (issue deduplication)
//!
//! The structure is a hash-indexed ring buffer: a fixed ring of slots carries
//! insertion order, and a side map gives O(1) line-to-slot lookup. When the
//! ring is full, the oldest slot is evicted to make room.

use std::collections::HashMap;

/// Identifier of a stream table entry.
pub type StreamId = usize;

/// One tracked prefetch.
#[derive(Clone, Copy, Debug)]
struct IssueSlot {
    /// Prefetched cache line.
    line: u64,
    /// Stream that issued the prefetch. Cleared when the stream is
    /// deallocated so a recycled slot index can never be misattributed.
    owner: Option<StreamId>,
    /// Whether the prefetched line has been filled into the cache.
    filled: bool,
}

/// Bounded FIFO of issued prefetches with reverse lookup by line.
pub struct IssueQueue {
    /// Ring of slots in insertion order. `head` is the next slot to claim.
    slots: Vec<Option<IssueSlot>>,
    head: usize,
    /// Line-to-slot index over the live slots.
    index: HashMap<u64, usize>,
}

impl IssueQueue {
    /// Creates an empty queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            slots: vec![None; capacity],
            head: 0,
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of tracked lines.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no lines are tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the maximum number of tracked lines.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Records that `stream` issued a prefetch for `line`.
    ///
    /// If the ring is full, the oldest entry is evicted first. A push for a
    /// line that is already tracked refreshes the existing entry in place
    /// (new owner, fill bit cleared) without consuming a FIFO slot.
    pub fn push(&mut self, line: u64, stream: StreamId) {
        if let Some(&slot) = self.index.get(&line) {
            let entry = self.slots[slot].as_mut().expect("indexed slot is live");
            entry.owner = Some(stream);
            entry.filled = false;
            return;
        }

        if let Some(old) = self.slots[self.head].take() {
            self.index.remove(&old.line);
        }
        self.slots[self.head] = Some(IssueSlot {
            line,
            owner: Some(stream),
            filled: false,
        });
        self.index.insert(line, self.head);
        self.head = (self.head + 1) % self.slots.len();
    }

    /// Returns the stream that issued a prefetch for `line`, if the line is
    /// tracked and its owner has not been invalidated.
    pub fn find(&self, line: u64) -> Option<StreamId> {
        let &slot = self.index.get(&line)?;
        self.slots[slot].as_ref()?.owner
    }

    /// Marks `line` as filled into the cache. No-op if the line is not
    /// tracked.
    pub fn fill(&mut self, line: u64) {
        if let Some(&slot) = self.index.get(&line) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.filled = true;
            }
        }
    }

    /// Returns `true` if `line` is tracked and has been filled.
    pub fn is_filled(&self, line: u64) -> bool {
        self.index
            .get(&line)
            .and_then(|&slot| self.slots[slot].as_ref())
            .is_some_and(|entry| entry.filled)
    }

    /// Disowns every entry issued by `stream`.
    ///
    /// The lines stay in the FIFO (their slots still age out in order), but
    /// they can no longer be attributed to any stream.
    pub fn invalidate(&mut self, stream: StreamId) {
        for entry in self.slots.iter_mut().flatten() {
            if entry.owner == Some(stream) {
                entry.owner = None;
            }
        }
    }
}
