//! Stream Candidate Table.
//!
//! Before a stream is allocated, accesses train a table of *candidates*:
//! directional hypotheses about a small region of memory. A candidate is
//! anchored at the line that first touched its region; later accesses within
//! the window vote on a direction. Consistent votes build confidence, a
//! contradicting vote refutes the hypothesis and re-anchors the candidate,
//! and a saturated confidence counter promotes the region to a full stream.

use super::super::counter::SaturatingCounter;

/// Number of candidate entries.
pub const CANDIDATE_TABLE_SIZE: usize = 32;

/// Half-width of the region a candidate watches, in cache lines. An access
/// trains a candidate when it lands within this many lines of the anchor.
pub const CANDIDATE_WINDOW: u64 = 16;

/// Training outcome for one access, consumed by the prefetcher shell.
///
/// The variants carry exactly the information each dispatch path needs, so
/// the shell's `match` is exhaustive and no field is ever meaningless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    /// No usable hypothesis: the access allocated a fresh candidate, or
    /// refuted an existing one.
    NoCandidate,

    /// A candidate in this region is learning; its direction can steer a
    /// conservative fallback prefetch.
    Weak {
        /// Learned direction (`true` = ascending line addresses).
        ascending: bool,
    },

    /// The candidate's confidence saturated: promote to a stream.
    Strong {
        /// Line at which to anchor the new stream (the accessed line).
        line: u64,
        /// Learned direction of the region.
        ascending: bool,
    },
}

/// One directional hypothesis.
#[derive(Clone, Copy, Debug, Default)]
struct CandidateEntry {
    allocated: bool,
    /// Clock-style reference bit used by the eviction scan.
    recently_used: bool,
    /// Line whose access created this candidate.
    anchor_line: u64,
    /// Learned direction (`true` = ascending). Meaningful once confidence
    /// is nonzero.
    ascending: bool,
    confidence: SaturatingCounter<0, 3>,
}

/// Fixed-size table of stream candidates.
pub struct CandidateTable {
    entries: Vec<CandidateEntry>,
    /// xorshift state for the last-resort random eviction pick.
    rng_state: u64,
}

impl CandidateTable {
    /// Creates an empty table.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the eviction tie-break generator. Runs with the
    ///   same seed and access sequence make the same choices.
    pub fn new(seed: u64) -> Self {
        Self {
            entries: vec![CandidateEntry::default(); CANDIDATE_TABLE_SIZE],
            // xorshift has a fixed point at zero.
            rng_state: if seed == 0 { 0x9E3779B9 } else { seed },
        }
    }

    /// Trains the table on an accessed line and reports the outcome.
    ///
    /// One access trains at most one candidate. If no candidate watches the
    /// region around `line`, a fresh one is anchored there. A vote against
    /// the learned direction refutes the candidate and re-anchors it at
    /// `line`. A vote that saturates the confidence counter deallocates the
    /// candidate and returns [`Hint::Strong`]; the caller performs the
    /// promotion.
    pub fn train(&mut self, line: u64) -> Hint {
        let Some(idx) = self.find(line) else {
            self.allocate(line);
            return Hint::NoCandidate;
        };

        self.entries[idx].recently_used = true;

        let ascending = line > self.entries[idx].anchor_line;
        if self.entries[idx].confidence.get() == 0 {
            self.entries[idx].ascending = ascending;
        }

        if self.entries[idx].ascending != ascending {
            // The region moved the other way: the hypothesis is refuted.
            self.entries[idx].allocated = false;
            self.allocate(line);
            return Hint::NoCandidate;
        }

        self.entries[idx].confidence.increment();
        if self.entries[idx].confidence.is_max() {
            self.entries[idx].allocated = false;
            return Hint::Strong { line, ascending };
        }

        Hint::Weak { ascending }
    }

    /// Finds the first allocated candidate whose window covers `line`.
    ///
    /// The anchor itself does not match: a repeat access to the anchor line
    /// carries no direction information.
    fn find(&self, line: u64) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry.allocated
                && entry.anchor_line != line
                && entry.anchor_line.abs_diff(line) <= CANDIDATE_WINDOW
        })
    }

    /// Anchors a fresh candidate at `line`, evicting if the table is full.
    ///
    /// Eviction prefers a free slot, then any slot whose reference bit is
    /// clear; if every slot was recently used, all reference bits are
    /// cleared and a slot is picked uniformly at random.
    fn allocate(&mut self, line: u64) -> usize {
        let slot = if let Some(free) = self.entries.iter().position(|e| !e.allocated) {
            free
        } else if let Some(cold) = self.entries.iter().position(|e| !e.recently_used) {
            cold
        } else {
            for entry in self.entries.iter_mut() {
                entry.recently_used = false;
            }
            self.next_random_index()
        };

        self.entries[slot] = CandidateEntry {
            allocated: true,
            recently_used: true,
            anchor_line: line,
            ascending: false,
            confidence: SaturatingCounter::default(),
        };
        slot
    }

    /// Advances the xorshift generator and maps it to a table index.
    fn next_random_index(&mut self) -> usize {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        (x as usize) % self.entries.len()
    }
}
