//! Brand tokens that scope the shared state of one kernel invocation.
//!
//! Every top-level kernel call opens a fresh brand with [`GhostToken::new`].
//! The atomics, frontier queues and barriers allocated for that call carry the
//! brand, so state from one call cannot leak into a team spawned by another.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is intentionally **not** `Copy`/`Clone`. A shared
//! `&GhostToken<'brand>` is what team members receive; it authorizes barrier
//! participation and reads of branded state.

use core::marker::PhantomData;

/// Marker that is invariant in `'brand`, so two scopes never unify.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Brand<'brand>(PhantomData<fn(&'brand ()) -> &'brand ()>);

/// A zero-sized token identifying one branded scope.
#[derive(Debug)]
pub struct GhostToken<'brand>(Brand<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and executes a closure with it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spargraph::GhostToken;
    /// use spargraph::concurrency::atomic::GhostAtomicUsize;
    /// use core::sync::atomic::Ordering;
    ///
    /// let seen = GhostToken::new(|_token| {
    ///     let counter = GhostAtomicUsize::new(0);
    ///     counter.fetch_add(3, Ordering::Relaxed);
    ///     counter.load(Ordering::Relaxed)
    /// });
    /// assert_eq!(seen, 3);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(Brand::default()))
    }
}

// `GhostToken<'brand>` holds no data. Sharing `&GhostToken<'brand>` across a
// worker team only grants barrier participation and reads of branded atomics.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
