//! `GhostBarrier`: a token-gated barrier.

use std::marker::PhantomData;
use std::sync::{Barrier, BarrierWaitResult};

use crate::token::GhostToken;

/// A barrier that requires a token of its brand to participate.
///
/// Only workers spawned inside the same branded kernel call can rendezvous
/// here, so a level or iteration boundary of one call can never be satisfied
/// by workers of another.
pub struct GhostBarrier<'brand> {
    inner: Barrier,
    _phantom: PhantomData<fn(&'brand ()) -> &'brand ()>,
}

impl<'brand> GhostBarrier<'brand> {
    /// Creates a new barrier that blocks `n` workers.
    pub fn new(n: usize) -> Self {
        Self {
            inner: Barrier::new(n),
            _phantom: PhantomData,
        }
    }

    /// Blocks the current worker until all workers have rendezvoused here.
    pub fn wait(&self, _token: &GhostToken<'brand>) -> BarrierWaitResult {
        self.inner.wait()
    }
}
