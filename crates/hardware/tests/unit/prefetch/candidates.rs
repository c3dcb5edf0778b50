//! Candidate Table Tests.
//!
//! Verifies the life of a directional hypothesis: allocation on first
//! touch, confidence growth under consistent votes, refutation on a
//! contradicting vote, and promotion once confidence saturates.

use prefetch_core::prefetch::stream::{CandidateTable, Hint, CANDIDATE_WINDOW};

// ══════════════════════════════════════════════════════════
// 1. Allocation and training
// ══════════════════════════════════════════════════════════

/// The first touch of a region allocates a candidate and yields no hint.
#[test]
fn first_touch_allocates() {
    let mut table = CandidateTable::new(1);
    assert_eq!(table.train(100), Hint::NoCandidate);
}

/// Consistent ascending votes build confidence and promote in exactly three
/// trainings after allocation.
#[test]
fn ascending_stream_promotes_in_three_votes() {
    let mut table = CandidateTable::new(1);
    assert_eq!(table.train(100), Hint::NoCandidate);
    assert_eq!(table.train(101), Hint::Weak { ascending: true });
    assert_eq!(table.train(102), Hint::Weak { ascending: true });
    assert_eq!(
        table.train(103),
        Hint::Strong {
            line: 103,
            ascending: true
        }
    );
}

/// A promoted candidate leaves the table; the next touch starts over.
#[test]
fn promotion_deallocates_the_candidate() {
    let mut table = CandidateTable::new(1);
    table.train(100);
    table.train(101);
    table.train(102);
    table.train(103);
    assert_eq!(table.train(104), Hint::NoCandidate);
}

/// Descending streams promote with the descending direction.
#[test]
fn descending_stream_promotes_descending() {
    let mut table = CandidateTable::new(1);
    assert_eq!(table.train(500), Hint::NoCandidate);
    assert_eq!(table.train(499), Hint::Weak { ascending: false });
    assert_eq!(table.train(498), Hint::Weak { ascending: false });
    assert_eq!(
        table.train(497),
        Hint::Strong {
            line: 497,
            ascending: false
        }
    );
}

// ══════════════════════════════════════════════════════════
// 2. Refutation
// ══════════════════════════════════════════════════════════

/// A vote against the learned direction refutes the hypothesis and
/// re-anchors the candidate at the contradicting line.
#[test]
fn direction_flip_reallocates() {
    let mut table = CandidateTable::new(1);
    assert_eq!(table.train(200), Hint::NoCandidate);
    assert_eq!(table.train(201), Hint::Weak { ascending: true });
    // 199 contradicts the ascending hypothesis.
    assert_eq!(table.train(199), Hint::NoCandidate);
    // The fresh candidate is anchored at 199 and learns descending.
    assert_eq!(table.train(198), Hint::Weak { ascending: false });
}

// ══════════════════════════════════════════════════════════
// 3. Region window
// ══════════════════════════════════════════════════════════

/// Accesses at the window edge still train; one line past it do not.
#[test]
fn window_boundary() {
    let mut table = CandidateTable::new(1);
    table.train(1000);
    assert_eq!(
        table.train(1000 + CANDIDATE_WINDOW),
        Hint::Weak { ascending: true }
    );

    let mut table = CandidateTable::new(1);
    table.train(1000);
    // Past the window: a separate region, so a fresh candidate.
    assert_eq!(table.train(1000 + CANDIDATE_WINDOW + 1), Hint::NoCandidate);
}

/// Distant regions train independent candidates.
#[test]
fn distant_regions_are_independent() {
    let mut table = CandidateTable::new(9);
    assert_eq!(table.train(1000), Hint::NoCandidate);
    assert_eq!(table.train(5000), Hint::NoCandidate);
    assert_eq!(table.train(1001), Hint::Weak { ascending: true });
    assert_eq!(table.train(4999), Hint::Weak { ascending: false });
}
