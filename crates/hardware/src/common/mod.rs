//! Common types shared across the cache simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Memory Access:** Definitions for categorizing demand traffic (loads,
//!    stores, prefetches, translations).
//! 2. **Access Records:** The `(address, ip, kind)` triple that workloads
//!    produce and the cache consumes.

/// Memory access type definitions and access records.
pub mod data;

pub use data::{Access, AccessType};
