//! Simulation Driver.
//!
//! Owns the cache model and the statistics for one run, and pushes a
//! workload's demand accesses through them.

use crate::cache::CacheSim;
use crate::common::{Access, AccessType};
use crate::config::Config;
use crate::sim::workload::Workload;
use crate::stats::SimStats;

/// A single-cache simulation run.
pub struct Simulator {
    /// The simulated L1 data cache.
    pub cache: CacheSim,
    /// Statistics collected so far.
    pub stats: SimStats,
    next_level_latency: u64,
}

impl Simulator {
    /// Creates a simulator from a configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            cache: CacheSim::new(&config.cache, config.general.seed),
            stats: SimStats::default(),
            next_level_latency: config.cache.next_level_latency,
        }
    }

    /// Simulates a single demand access.
    pub fn step(&mut self, access: Access) {
        let (hit, penalty) = self.cache.access(
            access.addr,
            access.ip,
            access.kind,
            self.next_level_latency,
        );

        self.stats.accesses += 1;
        self.stats.cycles += self.cache.latency + penalty;
        match access.kind {
            AccessType::Load => self.stats.loads += 1,
            AccessType::Store => self.stats.stores += 1,
            AccessType::Prefetch | AccessType::Translation => {}
        }
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
    }

    /// Drives `accesses` demand accesses from `workload` through the cache.
    ///
    /// Cache-level prefetch counters are folded into the statistics when the
    /// run completes.
    pub fn run(&mut self, workload: &mut Workload, accesses: u64) {
        for _ in 0..accesses {
            let access = workload.next_access();
            self.step(access);
        }
        self.stats.writebacks = self.cache.writebacks;
        self.stats.prefetches_issued = self.cache.prefetches_issued;
        self.stats.prefetch_installs = self.cache.prefetch_installs;
    }
}
