//! # `spargraph` - Parallel Sparse-Graph Kernels
//!
//! Two shared-memory kernels over compressed sparse row (CSR) adjacency:
//!
//! - **Distance-2 coloring**: a speculate-and-resolve parallel greedy coloring
//!   in which no two vertices sharing a neighbor receive the same color. Three
//!   forbidden-color representations are available, and a serial fallback
//!   guarantees completion.
//! - **Reverse Cuthill-McKee**: a bandwidth-reducing reordering built from a
//!   team-parallel breadth-first search and a per-level radix sort.
//!
//! ## Concurrency Model
//!
//! Every kernel call opens a fresh brand with [`GhostToken::new`]. The shared
//! state of that call (color slots, visit markers, frontier queues, barriers)
//! carries the brand, so it cannot be mixed with the state of another call.
//!
//! Within a call the rules are:
//! - **No locks**: workers race only on atomics, and only where the algorithm
//!   tolerates or resolves the race (speculative colors, CAS-claimed visits,
//!   fetch-and-add list cursors).
//! - **Barriers between phases**: team kernels synchronize with a branded
//!   barrier; every member executes the same sequence of barriers.
//! - **Deterministic outputs where promised**: RCM orders and verification
//!   results do not depend on the number of workers.
//!
//! ## Example
//!
//! ```rust
//! use spargraph::{color_distance2, reverse_cuthill_mckee, ColoringConfig, CsrGraph, RcmConfig};
//!
//! let g = CsrGraph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
//!
//! let coloring = color_distance2(&g, &g.transpose(), &ColoringConfig::default()).unwrap();
//! assert!(coloring.colors.iter().all(|&c| c >= 1));
//!
//! let rcm = reverse_cuthill_mckee(&g, &RcmConfig::default()).unwrap();
//! assert_eq!(rcm.permutation().len(), 6);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod coloring;
pub mod concurrency;
pub mod error;
pub mod graph;
pub mod ordering;
pub mod token;

pub use coloring::{
    color_distance2, verify_distance2, ColoringConfig, ColoringResult, Distance2Algorithm,
    Distance2Validation, PhaseTimings,
};
pub use error::{Error, Result};
pub use graph::CsrGraph;
pub use ordering::{
    find_peripheral, parallel_bfs, radix_sort_keys_and_values, reverse_cuthill_mckee, LevelStructure,
    RcmConfig, RcmOrdering,
};
pub use token::GhostToken;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // Branded atomics are `repr(transparent)` over the std atomics.
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicUsize<'static>>()
            == mem::size_of::<core::sync::atomic::AtomicUsize>()
    );
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicU64<'static>>()
            == mem::size_of::<core::sync::atomic::AtomicU64>()
    );

    // Per-worker counters never share a cache line.
    assert!(mem::align_of::<concurrency::CachePadded<concurrency::atomic::GhostAtomicUsize<'static>>>() >= 64);
};
