//! Stream Table.
//!
//! Tracks the active prefetch streams. Each stream projects a batch of
//! prefetches ahead of its front on every triggering access, at a distance
//! and degree selected from exponential level tables. Per-period counters
//! measure how many of a stream's prefetches were issued, how many were
//! later demanded (useful), and how many had landed in the cache before the
//! demand arrived (timely); the periodic retune turns those ratios into
//! distance/degree adjustments and a lifetime usefulness score that drives
//! eviction.

use log::debug;

use super::super::counter::SaturatingCounter;
use super::issue::{IssueQueue, StreamId};

/// Number of stream entries.
pub const STREAM_TABLE_SIZE: usize = 32;

/// Capacity of the issue queue shared by all streams.
pub const ISSUE_QUEUE_CAPACITY: usize = 512;

/// Length of one observation period, in demand accesses. Also the saturation
/// point of every per-period counter.
pub const ACCESS_PERIOD: i16 = 511;

/// Below this timeliness, prefetches are arriving late: raise the distance.
const TIMELINESS_BOOST_THRESHOLD: f64 = 0.4;

/// Above this accuracy, the stream is reliable: raise the degree.
const ACCURACY_BOOST_THRESHOLD: f64 = 0.8;

/// Below this accuracy, the stream is wasteful: lower degree and distance.
const ACCURACY_THROTTLE_THRESHOLD: f64 = 0.4;

/// One active prefetch stream.
#[derive(Clone, Copy, Debug, Default)]
struct StreamEntry {
    allocated: bool,
    /// Direction of travel (`true` = ascending line addresses).
    ascending: bool,
    /// Most recently projected line; the front of the stream.
    anchor_line: u64,
    /// Distance level. Real look-ahead is `4^(level + 1)` lines: 4, 16, 64.
    distance: SaturatingCounter<0, 2>,
    /// Degree level. Real batch size is `2^level` lines: 1, 2, 4.
    degree: SaturatingCounter<0, 2>,
    /// Lifetime usefulness score; the eviction key. Raised or lowered once
    /// per period by the retune.
    usefulness: SaturatingCounter<0, 3>,
    /// Prefetches issued this period.
    period_issued: SaturatingCounter<0, { ACCESS_PERIOD }>,
    /// Issued prefetches that saw a demand access this period.
    period_useful: SaturatingCounter<0, { ACCESS_PERIOD }>,
    /// Useful prefetches whose line had already been filled.
    period_timely: SaturatingCounter<0, { ACCESS_PERIOD }>,
}

impl StreamEntry {
    /// Real projection distance in lines for the current distance level.
    fn real_distance(&self) -> i64 {
        1 << (2 * (self.distance.get() + 1))
    }

    /// Real projection batch size for the current degree level.
    fn real_degree(&self) -> i64 {
        1 << self.degree.get()
    }
}

/// Fixed-size table of active streams plus their shared issue queue.
pub struct StreamTable {
    entries: Vec<StreamEntry>,
    issued: IssueQueue,
}

impl StreamTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: vec![StreamEntry::default(); STREAM_TABLE_SIZE],
            issued: IssueQueue::new(ISSUE_QUEUE_CAPACITY),
        }
    }

    /// Handles a demand access to a line this table prefetched earlier.
    ///
    /// If no stream owns `line`, returns an empty batch and the caller falls
    /// through to candidate training. Otherwise the owning stream is
    /// credited one useful prefetch (and one timely prefetch if the line had
    /// already been filled) and projects its next batch from `line`.
    pub fn prefetch_on_hit(&mut self, line: u64) -> Vec<u64> {
        let Some(stream) = self.issued.find(line) else {
            return Vec::new();
        };
        self.entries[stream].period_useful.increment();
        if self.issued.is_filled(line) {
            self.entries[stream].period_timely.increment();
        }
        self.project(stream, line)
    }

    /// Promotes a trained candidate into a stream and projects from it.
    ///
    /// If `line` was prefetched by a still-live stream travelling the same
    /// way, that stream is reused instead of allocating a duplicate.
    pub fn allocate_and_prefetch(&mut self, line: u64, ascending: bool) -> Vec<u64> {
        let stream = self.find_or_allocate(line, ascending);
        self.project(stream, line)
    }

    /// Marks a filled line in the issue queue so a later demand access can
    /// be counted as timely.
    pub fn fill(&mut self, line: u64) {
        self.issued.fill(line);
    }

    /// Retunes every allocated stream from its per-period ratios.
    ///
    /// Called once per observation period. The adjustments apply in a fixed
    /// order: late streams look further ahead, inaccurate streams back off
    /// both knobs, accurate streams fetch bigger batches. A stream earns
    /// lifetime credit only when it is accurate *and* carried its share of
    /// the period's traffic.
    pub fn train(&mut self) {
        // A stream must cover its proportionate slice of the period to earn
        // lifetime credit. Integer division, truncating.
        let fair_share = i64::from(ACCESS_PERIOD) / (2 * STREAM_TABLE_SIZE as i64);

        for (id, entry) in self.entries.iter_mut().enumerate() {
            if !entry.allocated {
                continue;
            }

            let useful = f64::from(entry.period_useful.get());
            let timely = f64::from(entry.period_timely.get());
            let issued = f64::from(entry.period_issued.get());
            let timeliness = if useful == 0.0 { 0.0 } else { timely / useful };
            let accuracy = if issued == 0.0 { 0.0 } else { useful / issued };

            if timeliness <= TIMELINESS_BOOST_THRESHOLD {
                entry.distance.increment();
            }

            if accuracy <= ACCURACY_THROTTLE_THRESHOLD {
                entry.degree.decrement();
                entry.distance.decrement();
            } else if accuracy >= ACCURACY_BOOST_THRESHOLD {
                entry.degree.increment();
            }

            if accuracy >= ACCURACY_THROTTLE_THRESHOLD
                && i64::from(entry.period_useful.get()) >= fair_share
            {
                entry.usefulness.increment();
            } else {
                entry.usefulness.decrement();
            }

            debug!(
                "stream {id}: accuracy {accuracy:.2} timeliness {timeliness:.2} -> \
                 distance {} degree {} usefulness {}",
                entry.real_distance(),
                entry.real_degree(),
                entry.usefulness.get(),
            );

            entry.period_useful.reset();
            entry.period_timely.reset();
            entry.period_issued.reset();
        }
    }

    /// Projects the next prefetch batch for `stream` from `line`.
    ///
    /// Each line in the batch that is not already tracked by the issue queue
    /// is emitted, recorded against the stream, and becomes the new front.
    fn project(&mut self, stream: StreamId, line: u64) -> Vec<u64> {
        let distance = self.entries[stream].real_distance();
        let degree = self.entries[stream].real_degree();
        let step: i64 = if self.entries[stream].ascending { 1 } else { -1 };

        let mut batch = Vec::with_capacity(degree as usize);
        for i in 1..=degree {
            let target = line.wrapping_add_signed((distance + i) * step);
            if self.issued.find(target).is_some() {
                continue;
            }
            batch.push(target);
            self.issued.push(target, stream);
            self.entries[stream].period_issued.increment();
            self.entries[stream].anchor_line = target;
        }
        batch
    }

    /// Returns the live stream that prefetched `line` and travels in the
    /// same direction, or allocates a new stream at `line`.
    fn find_or_allocate(&mut self, line: u64, ascending: bool) -> StreamId {
        if let Some(stream) = self.issued.find(line) {
            if self.entries[stream].allocated && self.entries[stream].ascending == ascending {
                return stream;
            }
        }
        self.allocate(line, ascending)
    }

    /// Allocates a stream at `line`, evicting the least useful one if the
    /// table is full (ties broken by lowest index).
    fn allocate(&mut self, line: u64, ascending: bool) -> StreamId {
        let stream = match self.entries.iter().position(|e| !e.allocated) {
            Some(free) => free,
            None => {
                let mut victim = 0;
                for (id, entry) in self.entries.iter().enumerate() {
                    if entry.usefulness.get() < self.entries[victim].usefulness.get() {
                        victim = id;
                    }
                }
                self.deallocate(victim);
                debug!("stream table full: evicted stream {victim}");
                victim
            }
        };

        self.entries[stream] = StreamEntry {
            allocated: true,
            ascending,
            anchor_line: line,
            usefulness: SaturatingCounter::new(1),
            ..StreamEntry::default()
        };
        stream
    }

    /// Releases a stream and disowns its issue-queue entries, so no line can
    /// ever be attributed to a stream that no longer exists.
    fn deallocate(&mut self, stream: StreamId) {
        self.entries[stream].allocated = false;
        self.issued.invalidate(stream);
    }
}

impl Default for StreamTable {
    fn default() -> Self {
        Self::new()
    }
}
