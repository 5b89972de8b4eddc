//! Cache-padded wrapper to prevent false sharing.

use std::ops::Deref;

/// Pads a value to its own cache line.
///
/// Per-worker counters written every BFS batch sit next to each other in one
/// array; padding keeps one worker's store from invalidating its neighbors'.
/// 128 bytes covers x86 (64) and Apple Silicon (128).
#[repr(align(128))]
pub struct CachePadded<T> {
    value: T,
}

impl<T> CachePadded<T> {
    /// Creates a new cache-padded value.
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> Deref for CachePadded<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}
