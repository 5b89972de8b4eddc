//! Concurrency primitives shared by the kernels.
//!
//! Both kernels follow the same discipline: independent data-parallel loops
//! with no locks, atomics only where two workers can race on one slot, and
//! barriers as the only synchronization points between phases.
//!
//! - `atomic`: branded atomics for color slots, visit markers and list cursors.
//! - `sync`: the branded barrier.
//! - `team`: a fixed-size group of cooperating workers (rank/size/barrier).

pub mod atomic;
pub mod cache_padded;
pub mod sync;
pub mod team;

pub use cache_padded::CachePadded;
pub use team::{run_team, TeamMember};
