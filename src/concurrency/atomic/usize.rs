use core::{
    marker::PhantomData,
    sync::atomic::{AtomicUsize, Ordering},
};

/// A branded `AtomicUsize`.
#[repr(transparent)]
pub struct GhostAtomicUsize<'brand> {
    inner: AtomicUsize,
    _brand: PhantomData<&'brand mut ()>,
}

impl<'brand> GhostAtomicUsize<'brand> {
    /// Creates a new branded atomic usize.
    #[inline(always)]
    pub const fn new(value: usize) -> Self {
        Self {
            inner: AtomicUsize::new(value),
            _brand: PhantomData,
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> usize {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: usize, order: Ordering) {
        self.inner.store(value, order);
    }

    /// Adds to the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, value: usize, order: Ordering) -> usize {
        self.inner.fetch_add(value, order)
    }

    /// Claims the slot by moving it from `from` to `to`.
    ///
    /// Returns `true` for exactly one caller when several race on the same slot.
    /// Uses `AcqRel` on success and `Acquire` on failure.
    #[inline(always)]
    pub fn claim(&self, from: usize, to: usize) -> bool {
        self.inner
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Consumes the atomic and returns the contained value.
    #[inline(always)]
    pub fn into_inner(self) -> usize {
        self.inner.into_inner()
    }
}

// SAFETY: `AtomicUsize` is Send + Sync; brand is a ZST marker.
unsafe impl<'brand> Send for GhostAtomicUsize<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicUsize<'brand> {}
