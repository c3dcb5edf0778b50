//! Simulation driver and synthetic workloads.
//!
//! Provides the run loop that pushes generated access sequences through the
//! cache model and collects statistics.

/// Simulation run loop.
pub mod simulator;

/// Synthetic workload generators.
pub mod workload;

pub use simulator::Simulator;
pub use workload::{Workload, WorkloadKind};
