//! Branded synchronization primitives.

pub mod barrier;

pub use barrier::GhostBarrier;
