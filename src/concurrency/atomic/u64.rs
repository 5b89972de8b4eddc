use core::{
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

/// A branded `AtomicU64`.
///
/// Holds radix-sort scores written by team members at disjoint positions.
#[repr(transparent)]
pub struct GhostAtomicU64<'brand> {
    inner: AtomicU64,
    _brand: PhantomData<&'brand mut ()>,
}

impl<'brand> GhostAtomicU64<'brand> {
    /// Creates a new atomic value.
    #[inline(always)]
    pub const fn new(value: u64) -> Self {
        Self {
            inner: AtomicU64::new(value),
            _brand: PhantomData,
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> u64 {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: u64, order: Ordering) {
        self.inner.store(value, order);
    }
}

// SAFETY: `AtomicU64` is Send + Sync; brand is a ZST marker.
unsafe impl<'brand> Send for GhostAtomicU64<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicU64<'brand> {}
