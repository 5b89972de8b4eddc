//! Lock-free conflict detection between speculative rounds.

use core::sync::atomic::Ordering;

use rayon::prelude::*;

use crate::{concurrency::atomic::GhostAtomicUsize, graph::CsrGraph};

/// A recolor list: a fixed-capacity buffer plus its live length.
///
/// Two of these are flipped between rounds, so no round allocates.
pub(crate) struct WorkList<'brand> {
    slots: Vec<GhostAtomicUsize<'brand>>,
    len: usize,
}

impl<'brand> WorkList<'brand> {
    /// Every vertex `0..n`, in order.
    pub(crate) fn all(n: usize) -> Self {
        Self {
            slots: (0..n).into_par_iter().map(GhostAtomicUsize::new).collect(),
            len: n,
        }
    }

    /// An empty list able to hold `capacity` vertices.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| GhostAtomicUsize::new(0)).collect(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live prefix.
    #[inline]
    pub(crate) fn live(&self) -> &[GhostAtomicUsize<'brand>] {
        &self.slots[..self.len]
    }

    /// Plain copy of the live prefix.
    pub(crate) fn to_vec(&self) -> Vec<usize> {
        self.live().iter().map(|s| s.load(Ordering::Relaxed)).collect()
    }
}

/// Checks every vertex of `current` against its distance-2 neighbors.
///
/// A vertex sharing its color with any neighbor other than itself is reset to
/// `0` and appended to `next` through a fetch-and-add cursor. Both endpoints of
/// a conflicting pair may be appended. Returns the number of conflicts.
pub(crate) fn detect_conflicts<'brand>(
    graph: &CsrGraph,
    transpose: &CsrGraph,
    colors: &[GhostAtomicUsize<'brand>],
    current: &WorkList<'brand>,
    next: &mut WorkList<'brand>,
    chunk: usize,
) -> usize {
    let cursor = GhostAtomicUsize::new(0);
    let out = &next.slots;

    current.live().par_iter().with_min_len(chunk).for_each(|slot| {
        let v = slot.load(Ordering::Relaxed);
        let mine = colors[v].load(Ordering::Relaxed);
        let clash = graph.neighbors(v).iter().any(|&d1| {
            transpose
                .neighbors(d1)
                .iter()
                .any(|&d2| d2 != v && colors[d2].load(Ordering::Relaxed) == mine)
        });
        if clash {
            colors[v].store(0, Ordering::Relaxed);
            let at = cursor.fetch_add(1, Ordering::Relaxed);
            out[at].store(v, Ordering::Relaxed);
        }
    });

    next.len = cursor.into_inner();
    next.len
}
