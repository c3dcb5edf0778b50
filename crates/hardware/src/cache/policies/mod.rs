//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in set-associative
//! caches.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Random`: Random selection.

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use lru::LruPolicy;
pub use random::RandomPolicy;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync {
    /// Updates the policy state when a line is accessed.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: usize) -> usize;
}
