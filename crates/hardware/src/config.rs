//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (cache geometry, latencies,
//!    seeds).
//! 2. **Structures:** Hierarchical config for general settings and the L1
//!    data cache.
//! 3. **Enums:** Replacement policy and prefetcher selectors.
//!
//! Configuration is supplied as JSON (loaded by the CLI) or use
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Default L1 data cache size in bytes (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (8 ways).
    pub const CACHE_WAYS: usize = 8;

    /// Default cache access latency in cycles.
    pub const CACHE_LATENCY: u64 = 1;

    /// Default latency of the next memory level in cycles.
    pub const NEXT_LEVEL_LATENCY: u64 = 20;

    /// Default prefetch degree for the next-line prefetcher.
    pub const PREFETCH_DEGREE: usize = 1;

    /// Default seed for every pseudo-random choice in a run (workload
    /// generation and randomized table eviction).
    pub const SEED: u64 = 123456789;

    /// Default number of demand accesses per simulation run.
    pub const ACCESSES: u64 = 1_000_000;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict when a
/// new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the cache line that was accessed least recently.
    #[default]
    #[serde(alias = "LRU")]
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a pseudo-randomly selected cache line from the set.
    Random,
}

/// Hardware prefetcher types for cache prefetching.
///
/// Prefetchers predict future memory accesses and fetch data into the cache
/// before it is needed to reduce miss penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Prefetcher {
    /// No prefetching enabled.
    #[default]
    None,
    /// Next-line prefetcher.
    ///
    /// Prefetches the next sequential cache line(s) after each access.
    NextLine,
    /// Adaptive stream prefetcher.
    ///
    /// Detects directional access streams, projects them forward, and
    /// self-tunes its distance and degree from accuracy and timeliness.
    Stream,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use prefetch_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 32 * 1024);
/// assert_eq!(config.cache.line_bytes, 64);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// L1 data cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Seed for workload generation and randomized table eviction. Two runs
    /// with the same seed and workload are identical.
    #[serde(default = "GeneralConfig::default_seed")]
    pub seed: u64,

    /// Number of demand accesses to simulate.
    #[serde(default = "GeneralConfig::default_accesses")]
    pub accesses: u64,
}

impl GeneralConfig {
    /// Returns the default PRNG seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Returns the default access count per run.
    fn default_accesses() -> u64 {
        defaults::ACCESSES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: defaults::SEED,
            accesses: defaults::ACCESSES,
        }
    }
}

/// L1 data cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Enable this cache (when false, every access goes to the next level).
    #[serde(default = "CacheConfig::default_enabled")]
    pub enabled: bool,

    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Access latency in cycles
    #[serde(default = "CacheConfig::default_latency")]
    pub latency: u64,

    /// Latency of the next memory level in cycles
    #[serde(default = "CacheConfig::default_next_level_latency")]
    pub next_level_latency: u64,

    /// Hardware prefetcher type
    #[serde(default)]
    pub prefetcher: Prefetcher,

    /// Prefetch degree (lines per trigger, next-line prefetcher only)
    #[serde(default = "CacheConfig::default_prefetch_degree")]
    pub prefetch_degree: usize,
}

impl CacheConfig {
    /// Returns the default enable flag.
    fn default_enabled() -> bool {
        true
    }

    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default cache access latency in cycles.
    fn default_latency() -> u64 {
        defaults::CACHE_LATENCY
    }

    /// Returns the default next-level latency in cycles.
    fn default_next_level_latency() -> u64 {
        defaults::NEXT_LEVEL_LATENCY
    }

    /// Returns the default prefetch degree (lines per trigger).
    fn default_prefetch_degree() -> usize {
        defaults::PREFETCH_DEGREE
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// The cache is enabled, 32 KiB, 8-way, 64-byte lines, LRU replacement,
    /// no prefetching.
    fn default() -> Self {
        Self {
            enabled: true,
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            latency: defaults::CACHE_LATENCY,
            next_level_latency: defaults::NEXT_LEVEL_LATENCY,
            prefetcher: Prefetcher::default(),
            prefetch_degree: defaults::PREFETCH_DEGREE,
        }
    }
}
