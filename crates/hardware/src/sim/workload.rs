//! Synthetic Workload Generation.
//!
//! Workloads are the stimulus a simulation runs: deterministic generators
//! that produce demand access sequences with known structure. Each kind
//! stresses a different aspect of the prefetcher: clean directional
//! streams, strided walks, uniform random traffic, and several interleaved
//! streams competing for the candidate and stream tables.

use std::fmt;
use std::str::FromStr;

use crate::common::{Access, AccessType};

/// Base address of the simulated data region.
const REGION_BASE: u64 = 0x1000_0000;

/// Span of the random workload's region in bytes (16 MiB).
const RANDOM_REGION_BYTES: u64 = 16 * 1024 * 1024;

/// Spacing between the interleaved workload's streams in bytes (1 MiB).
const STREAM_SPACING_BYTES: u64 = 1024 * 1024;

/// Number of concurrent streams in the interleaved workload.
const INTERLEAVED_STREAMS: usize = 4;

/// One store for every eight accesses, roughly the load/store mix of
/// pointer-light integer code.
const STORE_PERIOD: u64 = 8;

/// The access patterns a workload can generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadKind {
    /// One stream walking up one cache line at a time.
    Ascending,
    /// One stream walking down one cache line at a time.
    Descending,
    /// One stream walking up several cache lines at a time.
    Strided,
    /// Uniform random lines within a fixed region.
    Random,
    /// Several ascending streams at distant bases, interleaved randomly.
    Interleaved,
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkloadKind::Ascending => "ascending",
            WorkloadKind::Descending => "descending",
            WorkloadKind::Strided => "strided",
            WorkloadKind::Random => "random",
            WorkloadKind::Interleaved => "interleaved",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" => Ok(WorkloadKind::Ascending),
            "descending" => Ok(WorkloadKind::Descending),
            "strided" => Ok(WorkloadKind::Strided),
            "random" => Ok(WorkloadKind::Random),
            "interleaved" => Ok(WorkloadKind::Interleaved),
            other => Err(format!(
                "unknown workload '{}' (expected ascending, descending, strided, random, or interleaved)",
                other
            )),
        }
    }
}

/// Deterministic generator of demand access sequences.
pub struct Workload {
    kind: WorkloadKind,
    /// Cache line size in bytes; the unit every pattern advances in.
    line_bytes: u64,
    /// Stride of the strided pattern, in lines.
    stride_lines: u64,
    /// Current position of each stream (one entry except for interleaved).
    fronts: Vec<u64>,
    /// Accesses generated so far; drives the load/store mix.
    count: u64,
    /// xorshift state for stream selection and random addressing.
    rng_state: u64,
}

impl Workload {
    /// Creates a workload generator.
    ///
    /// # Arguments
    ///
    /// * `kind` - The access pattern to generate.
    /// * `line_bytes` - Cache line size in bytes.
    /// * `seed` - PRNG seed; equal seeds generate equal sequences.
    pub fn new(kind: WorkloadKind, line_bytes: usize, seed: u64) -> Self {
        let line_bytes = if line_bytes == 0 { 64 } else { line_bytes as u64 };
        let fronts = match kind {
            WorkloadKind::Interleaved => (0..INTERLEAVED_STREAMS as u64)
                .map(|i| REGION_BASE + i * STREAM_SPACING_BYTES)
                .collect(),
            // The descending walk starts at the top of its region.
            WorkloadKind::Descending => vec![REGION_BASE + STREAM_SPACING_BYTES],
            _ => vec![REGION_BASE],
        };

        Self {
            kind,
            line_bytes,
            stride_lines: 4,
            fronts,
            count: 0,
            rng_state: if seed == 0 { 0x9E3779B9 } else { seed },
        }
    }

    /// Generates the next access in the sequence.
    pub fn next_access(&mut self) -> Access {
        let (addr, stream) = match self.kind {
            WorkloadKind::Ascending => {
                let addr = self.fronts[0];
                self.fronts[0] = addr.wrapping_add(self.line_bytes);
                (addr, 0)
            }
            WorkloadKind::Descending => {
                let addr = self.fronts[0];
                self.fronts[0] = addr.wrapping_sub(self.line_bytes);
                (addr, 0)
            }
            WorkloadKind::Strided => {
                let addr = self.fronts[0];
                self.fronts[0] = addr.wrapping_add(self.stride_lines * self.line_bytes);
                (addr, 0)
            }
            WorkloadKind::Random => {
                let lines = RANDOM_REGION_BYTES / self.line_bytes;
                let line = self.next_random() % lines;
                (REGION_BASE + line * self.line_bytes, 0)
            }
            WorkloadKind::Interleaved => {
                let stream = (self.next_random() as usize) % self.fronts.len();
                let addr = self.fronts[stream];
                self.fronts[stream] = addr.wrapping_add(self.line_bytes);
                (addr, stream)
            }
        };

        self.count += 1;
        let kind = if self.count % STORE_PERIOD == 0 {
            AccessType::Store
        } else {
            AccessType::Load
        };

        Access {
            addr,
            // A synthetic per-stream program counter.
            ip: 0x40_0000 + 4 * stream as u64,
            kind,
        }
    }

    /// Advances the xorshift generator.
    fn next_random(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }
}
