//! Shared primitive types used across the crate.

/// A simulation tick. One tick = one discrete time step within a run,
/// indexed from 0.
pub type Tick = u64;
