//! Adaptive Stream Prefetcher Tests.
//!
//! End-to-end scenarios through the assembled prefetcher: cold-start
//! fallbacks, candidate promotion, stream extension, timeliness marking,
//! and the address/line conversion at the trait boundary. Line numbers
//! assume 64-byte cache lines.

use prefetch_core::common::AccessType;
use prefetch_core::prefetch::{Prefetcher, StreamPrefetcher};

const LINE: u64 = 64;

fn prefetcher() -> StreamPrefetcher {
    StreamPrefetcher::new(LINE as usize, 42)
}

// ══════════════════════════════════════════════════════════
// 1. Cold ascending stride
// ══════════════════════════════════════════════════════════

/// A cold ascending walk falls back to next-line requests until the
/// candidate promotes, then projects from the promoting access.
#[test]
fn cold_ascending_stride() {
    let mut pf = prefetcher();
    // First touch: fresh candidate, forward fallback 17 lines out.
    assert_eq!(pf.observe_line(100), vec![117]);
    // Votes build confidence; the fallback tracks the learned direction.
    assert_eq!(pf.observe_line(101), vec![118]);
    assert_eq!(pf.observe_line(102), vec![119]);
    // Third vote saturates: promote and project 4 + 1 lines ahead.
    assert_eq!(pf.observe_line(103), vec![108]);
}

/// A cold descending walk mirrors the fallbacks and the projection.
#[test]
fn cold_descending_stride() {
    let mut pf = prefetcher();
    assert_eq!(pf.observe_line(500), vec![517]);
    assert_eq!(pf.observe_line(499), vec![482]);
    assert_eq!(pf.observe_line(498), vec![481]);
    assert_eq!(pf.observe_line(497), vec![492]);
}

// ══════════════════════════════════════════════════════════
// 2. Direction flip
// ══════════════════════════════════════════════════════════

/// A contradicting access refutes the candidate; training restarts at the
/// contradicting line with the new direction.
#[test]
fn direction_flip_restarts_training() {
    let mut pf = prefetcher();
    assert_eq!(pf.observe_line(200), vec![217]);
    assert_eq!(pf.observe_line(201), vec![218]);
    // 199 contradicts: refute, re-anchor at 199, forward fallback.
    assert_eq!(pf.observe_line(199), vec![216]);
    // The re-anchored candidate learns descending.
    assert_eq!(pf.observe_line(198), vec![181]);
}

// ══════════════════════════════════════════════════════════
// 3. Stream reuse and timeliness
// ══════════════════════════════════════════════════════════

/// A demand access to a projected line extends the stream from that line.
#[test]
fn stream_reuse_extends_projection() {
    let mut pf = prefetcher();
    pf.observe_line(100);
    pf.observe_line(101);
    pf.observe_line(102);
    assert_eq!(pf.observe_line(103), vec![108]);
    // 108 was prefetched by the stream; the stream advances from it.
    assert_eq!(pf.observe_line(108), vec![113]);
    assert_eq!(pf.observe_line(113), vec![118]);
}

/// Fills are accepted before the demand access arrives and do not disturb
/// the projection sequence.
#[test]
fn fill_before_demand_access() {
    let mut pf = prefetcher();
    pf.observe_line(100);
    pf.observe_line(101);
    pf.observe_line(102);
    assert_eq!(pf.observe_line(103), vec![108]);
    pf.fill_line(108);
    assert_eq!(pf.observe_line(108), vec![113]);
}

// ══════════════════════════════════════════════════════════
// 4. Address/line conversion
// ══════════════════════════════════════════════════════════

/// The trait surface converts byte addresses to lines and back.
#[test]
fn trait_surface_converts_addresses() {
    let mut pf = prefetcher();
    let out = pf.observe(100 * LINE, 0x40_0000, false, AccessType::Load);
    assert_eq!(out, vec![117 * LINE]);

    // Offsets within a line map to the same cache line.
    let out = pf.observe(101 * LINE + 8, 0x40_0000, false, AccessType::Load);
    assert_eq!(out, vec![118 * LINE]);
}

/// Fills arriving through the trait surface mark the right line.
#[test]
fn trait_surface_fill_uses_line_granularity() {
    let mut pf = prefetcher();
    for line in 100..=102 {
        pf.observe(line * LINE, 0, false, AccessType::Load);
    }
    assert_eq!(
        pf.observe(103 * LINE, 0, false, AccessType::Load),
        vec![108 * LINE]
    );
    pf.fill(108 * LINE + 16, true, 0);
    assert_eq!(
        pf.observe(108 * LINE, 0, true, AccessType::Load),
        vec![113 * LINE]
    );
}

// ══════════════════════════════════════════════════════════
// 5. Long runs
// ══════════════════════════════════════════════════════════

/// The prefetcher keeps producing requests across several retune periods.
/// Batches never include the accessed line and never exceed the maximum
/// degree.
#[test]
fn long_ascending_run_stays_live() {
    let mut pf = prefetcher();
    let mut total = 0;
    for line in 0..4096u64 {
        let batch = pf.observe_line(1_000_000 + line);
        assert!(!batch.contains(&(1_000_000 + line)));
        assert!(batch.len() <= 4, "batch exceeds the maximum degree");
        total += batch.len();
    }
    assert!(total >= 2048, "a monotonic run keeps the prefetcher busy");
}

/// Two interleaved streams in distant regions are tracked independently.
#[test]
fn interleaved_streams_are_tracked_independently() {
    let mut pf = prefetcher();
    // Train both regions to promotion, alternating accesses.
    for i in 0..4u64 {
        pf.observe_line(1000 + i);
        pf.observe_line(90_000 - i);
    }
    // Both streams are live: hits on their projected lines extend them.
    assert_eq!(pf.observe_line(1008), vec![1013]);
    assert_eq!(pf.observe_line(89_992), vec![89_987]);
}
