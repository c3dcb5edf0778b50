//! Cycle-level L1 data cache simulator with adaptive stream prefetching.
//!
//! This crate implements a set-associative cache model and the hardware
//! prefetchers that feed it:
//! 1. **Cache:** Set-associative cache with LRU/random replacement and
//!    write-back accounting.
//! 2. **Prefetch:** A next-line baseline and an adaptive stream prefetcher
//!    that detects directional streams, projects them forward, and
//!    self-tunes its distance and degree from accuracy and timeliness.
//! 3. **Simulation:** Synthetic workload generators, a run loop, and
//!    statistics collection.

/// Set-associative cache model and replacement policies.
pub mod cache;
/// Common types (access records and traffic classes).
pub mod common;
/// Simulator configuration (defaults, enums, config structures).
pub mod config;
/// Hardware prefetchers (next-line, adaptive stream).
pub mod prefetch;
/// Workload generation and the simulation run loop.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Simulation driver; owns the cache and statistics for one run.
pub use crate::sim::Simulator;
/// Statistics collected by a simulation run.
pub use crate::stats::SimStats;
