//! Next-Line Prefetcher Tests.
//!
//! Verifies sequential next-line generation, degree handling, and line
//! alignment of the emitted addresses.

use prefetch_core::common::AccessType;
use prefetch_core::prefetch::{NextLinePrefetcher, Prefetcher};

const LINE: u64 = 64;

/// Every access produces the next sequential line.
#[test]
fn prefetches_next_line() {
    let mut pf = NextLinePrefetcher::new(64, 1);
    let addrs = pf.observe(0x1000, 0, false, AccessType::Load);
    assert_eq!(addrs, vec![0x1000 + LINE]);
}

/// Degree-2 emits the next two lines.
#[test]
fn degree_2_emits_two_lines() {
    let mut pf = NextLinePrefetcher::new(64, 2);
    let addrs = pf.observe(0x2000, 0, false, AccessType::Load);
    assert_eq!(addrs, vec![0x2000 + LINE, 0x2000 + 2 * LINE]);
}

/// Targets are aligned to line boundaries regardless of the access offset.
#[test]
fn targets_are_line_aligned() {
    let mut pf = NextLinePrefetcher::new(64, 1);
    let addrs = pf.observe(0x1000 + 13, 0, false, AccessType::Load);
    assert_eq!(addrs, vec![0x1000 + LINE]);
}

/// A zero degree is promoted to one.
#[test]
fn zero_degree_is_promoted_to_one() {
    let mut pf = NextLinePrefetcher::new(64, 0);
    let addrs = pf.observe(0x3000, 0, true, AccessType::Store);
    assert_eq!(addrs.len(), 1);
}
