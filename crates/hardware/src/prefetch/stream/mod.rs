//! Adaptive Stream Prefetcher.
//!
//! Detects per-region monotonic access streams early, projects them forward,
//! and self-tunes its look-ahead distance and batch size from observed
//! accuracy and timeliness. The machinery is three coupled tables:
//!
//! * [`CandidateTable`] promotes single touches into directional hypotheses.
//! * [`StreamTable`] tracks promoted streams, issues prefetch batches at
//!   exponentially scaled distance/degree, and retunes both knobs once per
//!   observation period.
//! * [`IssueQueue`] maps recently prefetched lines back to their issuing
//!   stream with a fill bit, so usefulness and timeliness can be measured.
//!
//! Until a stream covers a region, the prefetcher falls back to a fixed
//! next-line request just beyond the candidate window, steered by whatever
//! direction the candidate has learned so far.

/// Stream candidate table and training hints.
pub mod candidates;

/// Bounded FIFO of issued prefetches.
pub mod issue;

/// Active stream table, projection, and periodic retune.
pub mod streams;

pub use candidates::{CandidateTable, Hint, CANDIDATE_TABLE_SIZE, CANDIDATE_WINDOW};
pub use issue::{IssueQueue, StreamId};
pub use streams::{StreamTable, ACCESS_PERIOD, ISSUE_QUEUE_CAPACITY, STREAM_TABLE_SIZE};

use log::debug;

use super::counter::SaturatingCounter;
use super::Prefetcher;
use crate::common::AccessType;

/// Distance of the fallback next-line prefetch, in lines: one line past the
/// candidate window, so fallback requests land outside the region the
/// candidate is still learning about.
const FALLBACK_DISTANCE: u64 = CANDIDATE_WINDOW + 1;

/// Adaptive stream prefetcher state.
pub struct StreamPrefetcher {
    /// log2 of the cache line size; converts addresses to line numbers.
    line_shift: u32,
    candidates: CandidateTable,
    streams: StreamTable,
    /// Demand accesses observed this period; saturation triggers the retune.
    accesses: SaturatingCounter<0, { ACCESS_PERIOD }>,
}

impl StreamPrefetcher {
    /// Creates a new adaptive stream prefetcher.
    ///
    /// # Arguments
    ///
    /// * `line_bytes` - The size of a cache line in bytes.
    /// * `seed` - Seed for the candidate table's eviction tie-break; runs
    ///   with the same seed and access sequence are fully deterministic.
    pub fn new(line_bytes: usize, seed: u64) -> Self {
        let safe_line = if line_bytes == 0 || !line_bytes.is_power_of_two() {
            64
        } else {
            line_bytes
        };

        Self {
            line_shift: safe_line.trailing_zeros(),
            candidates: CandidateTable::new(seed),
            streams: StreamTable::new(),
            accesses: SaturatingCounter::default(),
        }
    }

    /// Observes a demand access to a cache line and returns the lines to
    /// prefetch.
    ///
    /// The dispatch order is fixed: a line owned by a live stream extends
    /// that stream; otherwise the access trains the candidate table, and a
    /// saturated candidate is promoted on the spot. With neither in play, a
    /// fixed-distance next-line request keeps the prefetcher warm. Every
    /// access advances the period counter that drives the stream retune.
    pub fn observe_line(&mut self, line: u64) -> Vec<u64> {
        let mut batch = self.streams.prefetch_on_hit(line);

        if batch.is_empty() {
            match self.candidates.train(line) {
                Hint::Strong { line, ascending } => {
                    debug!("promoting candidate at line {line:#x} (ascending: {ascending})");
                    batch = self.streams.allocate_and_prefetch(line, ascending);
                }
                Hint::Weak { ascending } => {
                    let target = if ascending {
                        line.wrapping_add(FALLBACK_DISTANCE)
                    } else {
                        line.wrapping_sub(FALLBACK_DISTANCE)
                    };
                    batch = vec![target];
                }
                Hint::NoCandidate => {
                    batch = vec![line.wrapping_add(FALLBACK_DISTANCE)];
                }
            }
        }

        self.accesses.increment();
        if self.accesses.is_max() {
            self.accesses.reset();
            self.streams.train();
        }

        batch
    }

    /// Records that a cache line was filled.
    pub fn fill_line(&mut self, line: u64) {
        self.streams.fill(line);
    }
}

impl Prefetcher for StreamPrefetcher {
    fn name(&self) -> &'static str {
        "stream"
    }

    /// Observes a memory access and generates prefetch addresses.
    ///
    /// The instruction pointer and access type are accepted for interface
    /// compatibility but not consulted; training is purely address-based.
    fn observe(&mut self, addr: u64, _ip: u64, _hit: bool, _access: AccessType) -> Vec<u64> {
        let line = addr >> self.line_shift;
        self.observe_line(line)
            .into_iter()
            .map(|line| line << self.line_shift)
            .collect()
    }

    /// Marks the filled address in the issue queue.
    fn fill(&mut self, addr: u64, _was_prefetch: bool, _evicted_addr: u64) {
        self.fill_line(addr >> self.line_shift);
    }
}
