//! Branded, lock-free atomic primitives.
//!
//! These wrap hardware atomics while keeping the brand purely compile-time.
//! The kernels use them for the three races they allow:
//! - speculative color slots read by neighbors while their owner writes,
//! - BFS visit markers claimed by compare-and-swap,
//! - conflict-list cursors bumped by fetch-and-add.

/// Branded `AtomicU64`.
pub mod u64;
/// Branded `AtomicUsize`.
pub mod usize;

pub use u64::GhostAtomicU64;
pub use usize::GhostAtomicUsize;

use core::sync::atomic::Ordering;

/// Allocates `len` branded atomics initialized to `value`.
pub fn atomic_vec<'brand>(len: usize, value: usize) -> Vec<GhostAtomicUsize<'brand>> {
    (0..len).map(|_| GhostAtomicUsize::new(value)).collect()
}

/// Copies a slice into freshly allocated branded atomics.
pub fn atomic_vec_from<'brand>(values: &[usize]) -> Vec<GhostAtomicUsize<'brand>> {
    values.iter().map(|&v| GhostAtomicUsize::new(v)).collect()
}

/// Consumes branded atomics and returns their plain values.
pub fn into_plain(values: Vec<GhostAtomicUsize<'_>>) -> Vec<usize> {
    values.into_iter().map(GhostAtomicUsize::into_inner).collect()
}

/// Snapshots branded atomics without consuming them.
pub fn snapshot(values: &[GhostAtomicUsize<'_>]) -> Vec<usize> {
    values.iter().map(|v| v.load(Ordering::Relaxed)).collect()
}
