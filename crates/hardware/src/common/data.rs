//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout
//! the simulator. These types are used for the following:
//! 1. **Cache Behavior:** Deciding whether an access sets the dirty bit.
//! 2. **Prefetcher Hints:** The access type is forwarded to prefetchers,
//!    which may choose to ignore certain traffic classes.
//! 3. **Statistics Tracking:** Categorizing memory operations for reporting.

/// Type of memory access operation.
///
/// Mirrors the traffic classes a tag check can carry at an L1 data cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Demand data read access.
    ///
    /// Occurs during load instructions when reading data from memory.
    Load,

    /// Demand data write access.
    ///
    /// Occurs during store instructions; marks the accessed line dirty.
    Store,

    /// Access generated by a hardware prefetcher.
    Prefetch,

    /// Address-translation access (page-table walk traffic).
    Translation,
}

impl AccessType {
    /// Returns `true` if this access writes to the line.
    #[inline(always)]
    pub fn is_write(&self) -> bool {
        matches!(self, AccessType::Store)
    }
}

/// A single memory access as produced by a workload generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Byte address being accessed.
    pub addr: u64,
    /// Program counter of the instruction performing the access.
    pub ip: u64,
    /// Traffic class of the access.
    pub kind: AccessType,
}
