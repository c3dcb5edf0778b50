//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the cache simulator. It
//! provides:
//! 1. **Cycle accounting:** Total simulated cycles and average access
//!    latency.
//! 2. **Access mix:** Demand accesses by traffic class.
//! 3. **Cache behavior:** Hit/miss counts and write-backs.
//! 4. **Prefetching:** Prefetches issued and prefetched lines installed.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
///
/// Collects detailed statistics about demand traffic, cache behavior, and
/// prefetcher activity for performance analysis.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Number of demand accesses simulated.
    pub accesses: u64,

    /// Count of demand load accesses.
    pub loads: u64,
    /// Count of demand store accesses.
    pub stores: u64,

    /// Demand accesses that hit in the cache.
    pub hits: u64,
    /// Demand accesses that missed in the cache.
    pub misses: u64,
    /// Dirty lines written back to the next level.
    pub writebacks: u64,

    /// Prefetch requests issued by the prefetcher.
    pub prefetches_issued: u64,
    /// Prefetched lines actually installed (not already resident).
    pub prefetch_installs: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            accesses: 0,
            loads: 0,
            stores: 0,
            hits: 0,
            misses: 0,
            writebacks: 0,
            prefetches_issued: 0,
            prefetch_installs: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"memory"`, `"prefetch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "memory", "prefetch"];

impl SimStats {
    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"memory"`,
    /// or `"prefetch"`. Pass an empty slice to print all sections (same as
    /// `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let acc = if self.accesses == 0 { 1 } else { self.accesses };

        if want("summary") {
            let apc = self.accesses as f64 / seconds / 1_000_000.0;
            let cpa = self.cycles as f64 / acc as f64;
            println!("\n==========================================================");
            println!("CACHE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_accesses             {}", self.accesses);
            println!("sim_cycles_per_access    {:.4}", cpa);
            println!("sim_maccesses_per_sec    {:.2}", apc);
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            let total = self.hits + self.misses;
            let miss_rate = if total > 0 {
                (self.misses as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            println!("MEMORY HIERARCHY");
            println!(
                "  op.load                {} ({:.2}%)",
                self.loads,
                (self.loads as f64 / acc as f64) * 100.0
            );
            println!(
                "  op.store               {} ({:.2}%)",
                self.stores,
                (self.stores as f64 / acc as f64) * 100.0
            );
            println!(
                "  L1-D   accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                total, self.hits, miss_rate
            );
            println!("  writebacks             {}", self.writebacks);
            println!("----------------------------------------------------------");
        }
        if want("prefetch") {
            let installed = if self.prefetches_issued > 0 {
                (self.prefetch_installs as f64 / self.prefetches_issued as f64) * 100.0
            } else {
                0.0
            };
            println!("PREFETCHER");
            println!("  pf.issued              {}", self.prefetches_issued);
            println!(
                "  pf.installed           {} ({:.2}%)",
                self.prefetch_installs, installed
            );
            println!(
                "  pf.per_access          {:.4}",
                self.prefetches_issued as f64 / acc as f64
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
