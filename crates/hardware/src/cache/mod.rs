//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative cache simulator.
//! It supports LRU and random replacement and an optional hardware
//! prefetcher. It models cache hits, misses, and write-back penalties, and
//! reports every fill back to the prefetcher so prefetchers that track
//! in-flight requests can measure timeliness.

/// Cache replacement policy implementations (LRU, Random).
pub mod policies;

use self::policies::{LruPolicy, RandomPolicy, ReplacementPolicy};
use crate::common::AccessType;
use crate::config::{CacheConfig, Prefetcher as PrefetcherKind, ReplacementPolicy as PolicyKind};
use crate::prefetch::{NextLinePrefetcher, Prefetcher, StreamPrefetcher};

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
}

/// Cache simulator implementing a set-associative cache with configurable
/// policies.
///
/// Supports LRU and random replacement and the next-line or adaptive stream
/// prefetchers. Models cache hits, misses, and write-back penalties.
pub struct CacheSim {
    /// Access latency in cycles (added on hit; miss adds next-level latency).
    pub latency: u64,
    /// When false, accesses bypass this cache and use next-level latency only.
    pub enabled: bool,
    /// Optional hardware prefetcher (boxed for dynamic dispatch).
    pub prefetcher: Option<Box<dyn Prefetcher + Send + Sync>>,
    /// Prefetch requests issued by the prefetcher so far.
    pub prefetches_issued: u64,
    /// Prefetched lines actually installed (not already resident).
    pub prefetch_installs: u64,
    /// Dirty lines written back to the next level.
    pub writebacks: u64,
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration specifying size, associativity,
    ///   line size, replacement policy, and prefetcher
    /// * `seed` - Seed forwarded to prefetchers that use randomized
    ///   eviction, so simulations are reproducible
    ///
    /// # Returns
    ///
    /// A new `CacheSim` instance initialized according to the configuration.
    pub fn new(config: &CacheConfig, seed: u64) -> Self {
        let safe_ways = if config.ways == 0 { 1 } else { config.ways };
        let safe_line = if config.line_bytes == 0 || !config.line_bytes.is_power_of_two() {
            64
        } else {
            config.line_bytes
        };
        let safe_size = if config.size_bytes == 0 {
            4096
        } else {
            config.size_bytes
        };

        let num_lines = safe_size / safe_line;
        let num_sets = num_lines / safe_ways;

        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match config.policy {
            PolicyKind::Lru => Box::new(LruPolicy::new(num_sets, safe_ways)),
            PolicyKind::Random => Box::new(RandomPolicy::new(safe_ways, seed)),
        };

        let prefetcher: Option<Box<dyn Prefetcher + Send + Sync>> = match config.prefetcher {
            PrefetcherKind::NextLine => Some(Box::new(NextLinePrefetcher::new(
                safe_line,
                config.prefetch_degree,
            ))),
            PrefetcherKind::Stream => Some(Box::new(StreamPrefetcher::new(safe_line, seed))),
            PrefetcherKind::None => None,
        };

        Self {
            lines: vec![CacheLine::default(); num_sets * safe_ways],
            num_sets,
            ways: safe_ways,
            line_bytes: safe_line,
            latency: config.latency,
            enabled: config.enabled,
            policy,
            prefetcher,
            prefetches_issued: 0,
            prefetch_installs: 0,
            writebacks: 0,
        }
    }

    /// Checks if the cache contains the specified address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to check
    ///
    /// # Returns
    ///
    /// `true` if the address is present in the cache, `false` otherwise.
    pub fn contains(&self, addr: u64) -> bool {
        if !self.enabled {
            return false;
        }

        let set_index = ((addr as usize) / self.line_bytes) % self.num_sets;
        let tag = addr / (self.line_bytes * self.num_sets) as u64;
        let base_idx = set_index * self.ways;

        for i in 0..self.ways {
            let idx = base_idx + i;
            if self.lines[idx].valid && self.lines[idx].tag == tag {
                return true;
            }
        }
        false
    }

    /// Installs a cache line for the specified address.
    ///
    /// Selects a victim line using the replacement policy and installs the
    /// new line. Returns the write-back penalty (if the victim was dirty)
    /// and the byte address of the evicted line, if any.
    fn install_line(
        &mut self,
        addr: u64,
        is_write: bool,
        next_level_latency: u64,
    ) -> (u64, Option<u64>) {
        let set_index = ((addr as usize) / self.line_bytes) % self.num_sets;
        let tag = addr / (self.line_bytes * self.num_sets) as u64;
        let base_idx = set_index * self.ways;

        let victim_way = self.policy.get_victim(set_index);
        let victim_idx = base_idx + victim_way;
        let mut penalty = 0;
        let mut evicted = None;

        if self.lines[victim_idx].valid {
            let victim = &self.lines[victim_idx];
            evicted = Some(
                (victim.tag * self.num_sets as u64 + set_index as u64) * self.line_bytes as u64,
            );
            if victim.dirty {
                penalty += next_level_latency;
                self.writebacks += 1;
            }
        }

        self.lines[victim_idx] = CacheLine {
            tag,
            valid: true,
            dirty: is_write,
        };
        self.policy.update(set_index, victim_way);

        (penalty, evicted)
    }

    /// Accesses the cache for the specified address.
    ///
    /// Performs a cache lookup, updates the replacement policy on hit,
    /// installs the line on miss, and triggers the prefetcher. Prefetch
    /// targets not already resident are installed and reported back to the
    /// prefetcher as prefetch fills; demand misses are reported as demand
    /// fills.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to access
    /// * `ip` - Program counter of the accessing instruction
    /// * `access` - Traffic class of the access
    /// * `next_level_latency` - Latency of the next memory level
    ///
    /// # Returns
    ///
    /// A tuple `(hit, penalty)` where `hit` indicates a cache hit and
    /// `penalty` is the number of penalty cycles (0 on hit, miss penalty +
    /// write-back penalty on miss).
    pub fn access(
        &mut self,
        addr: u64,
        ip: u64,
        access: AccessType,
        next_level_latency: u64,
    ) -> (bool, u64) {
        if !self.enabled {
            return (false, 0);
        }

        let is_write = access.is_write();
        let set_index = ((addr as usize) / self.line_bytes) % self.num_sets;
        let tag = addr / (self.line_bytes * self.num_sets) as u64;
        let base_idx = set_index * self.ways;

        let mut hit = false;
        let mut penalty = 0;

        for i in 0..self.ways {
            let idx = base_idx + i;
            if self.lines[idx].valid && self.lines[idx].tag == tag {
                self.policy.update(set_index, i);
                if is_write {
                    self.lines[idx].dirty = true;
                }
                hit = true;
                break;
            }
        }

        // The prefetcher observes the tag check before any fill lands, the
        // same order the fills would resolve in hardware.
        let mut prefetches = Vec::new();
        if let Some(ref mut pref) = self.prefetcher {
            prefetches = pref.observe(addr, ip, hit, access);
        }
        self.prefetches_issued += prefetches.len() as u64;

        if !hit {
            penalty += next_level_latency;
            let (wb_penalty, evicted) = self.install_line(addr, is_write, next_level_latency);
            penalty += wb_penalty;
            if let Some(ref mut pref) = self.prefetcher {
                pref.fill(addr, false, evicted.unwrap_or(0));
            }
        }

        for target in prefetches {
            if !self.contains(target) {
                let (_, evicted) = self.install_line(target, false, next_level_latency);
                self.prefetch_installs += 1;
                if let Some(ref mut pref) = self.prefetcher {
                    pref.fill(target, true, evicted.unwrap_or(0));
                }
            }
        }

        (hit, penalty)
    }

    /// Flushes all dirty cache lines, invalidating them.
    ///
    /// Marks all valid and dirty lines as invalid. Used between workload
    /// phases that must not share cache state.
    pub fn flush(&mut self) {
        if !self.enabled {
            return;
        }
        for line in &mut self.lines {
            if line.valid && line.dirty {
                line.dirty = false;
                line.valid = false;
            }
        }
    }
}
