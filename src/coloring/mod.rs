//! Speculative parallel distance-2 coloring.
//!
//! The engine alternates two data-parallel passes over a shrinking work list:
//!
//! 1. **Speculate**: every listed vertex picks the smallest color not used by
//!    its distance-2 neighbors, without locks.
//! 2. **Detect**: every listed vertex that shares its color with a distance-2
//!    neighbor is uncolored and appended to the next list.
//!
//! When the list empties the coloring is complete. If it is still non-empty
//! after `max_iterations` rounds, the remaining vertices are colored serially.
//! The result is always a complete, conflict-free coloring.
//!
//! ```rust
//! use spargraph::{color_distance2, ColoringConfig, CsrGraph, verify_distance2};
//!
//! let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
//! let t = g.transpose();
//! let result = color_distance2(&g, &t, &ColoringConfig::default()).unwrap();
//!
//! assert_ne!(result.colors[0], result.colors[2]);
//! assert_ne!(result.colors[1], result.colors[3]);
//! assert!(verify_distance2(&g, &t, &result.colors).is_valid());
//! ```

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::{
    concurrency::atomic,
    error::{Error, Result},
    graph::CsrGraph,
    GhostToken,
};

pub mod config;
mod conflicts;
mod serial;
mod speculative;
pub mod stats;
pub mod verify;

pub use config::{ColoringConfig, Distance2Algorithm};
pub use stats::{color_histogram, distance2_degree, max_distance2_degree, num_colors};
pub use verify::{verify_distance2, Distance2Validation};

use conflicts::{detect_conflicts, WorkList};
use speculative::{FilteredRows, Speculation};

/// Wall-clock time spent in each phase, summed over iterations.
///
/// Only recorded when [`ColoringConfig::verbose`] is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseTimings {
    /// Speculative coloring.
    pub speculative: Duration,
    /// Conflict detection.
    pub conflict_detection: Duration,
    /// Serial fallback.
    pub serial_resolution: Duration,
    /// Whole call, including setup.
    pub total: Duration,
}

/// Output of [`color_distance2`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColoringResult {
    /// Color of every row, `>= 1`.
    pub colors: Vec<usize>,
    /// Number of speculate/detect rounds executed.
    pub num_phases: usize,
    /// Largest color used.
    pub num_colors: usize,
    /// Vertices colored by the serial fallback.
    pub serially_resolved: usize,
    /// Per-phase timings, zero unless verbose.
    pub timings: PhaseTimings,
}

/// Colors the rows of `graph` so that no two distance-2 neighbors share a color.
///
/// `transpose` must hold exactly the entries of `graph` transposed; for a
/// symmetric graph it may be a clone of `graph`.
///
/// # Errors
/// - [`Error::InvalidConfig`] if `config` fails validation.
/// - [`Error::TransposeMismatch`] if the shapes or entry counts disagree.
#[tracing::instrument(
    skip_all,
    fields(rows = graph.num_rows(), entries = graph.num_edges(), algorithm = %config.algorithm)
)]
pub fn color_distance2(
    graph: &CsrGraph,
    transpose: &CsrGraph,
    config: &ColoringConfig,
) -> Result<ColoringResult> {
    config.validate()?;
    check_transpose_shape(graph, transpose)?;
    debug_assert!(transpose.is_transpose_of(graph), "transpose entries differ");

    let nv = graph.num_rows();
    let verbose = config.verbose;
    let started = verbose.then(Instant::now);
    let mut timings = PhaseTimings::default();

    let (mut colors, remaining, num_phases) = GhostToken::new(|_token| {
        let colors = atomic::atomic_vec(nv, 0);
        let filtered = config
            .algorithm
            .uses_edge_filtering()
            .then(|| FilteredRows::new(graph));
        let speculation = Speculation {
            graph,
            transpose,
            colors: &colors,
            filtered: filtered.as_ref(),
        };

        let mut current = WorkList::all(nv);
        let mut next = WorkList::with_capacity(nv);
        let mut iteration = 0;

        while iteration < config.max_iterations && !current.is_empty() {
            let chunk = config.effective_chunk(current.len());

            let timer = verbose.then(Instant::now);
            speculation.color_list(config.algorithm, current.live(), chunk);
            if let Some(timer) = timer {
                timings.speculative += timer.elapsed();
            }

            let timer = verbose.then(Instant::now);
            let conflicts = detect_conflicts(graph, transpose, &colors, &current, &mut next, chunk);
            if let Some(timer) = timer {
                timings.conflict_detection += timer.elapsed();
            }

            if verbose {
                debug!(iteration, listed = current.len(), conflicts, "speculative round");
            }
            core::mem::swap(&mut current, &mut next);
            iteration += 1;
        }

        (atomic::into_plain(colors), current.to_vec(), iteration)
    });

    let mut serially_resolved = 0;
    if !remaining.is_empty() {
        let timer = verbose.then(Instant::now);
        serially_resolved = serial::resolve_conflicts_serial(graph, transpose, &mut colors, &remaining);
        if let Some(timer) = timer {
            timings.serial_resolution += timer.elapsed();
        }
        debug!(remaining = remaining.len(), serially_resolved, "serial fallback");
    }

    if let Some(started) = started {
        timings.total = started.elapsed();
    }
    let result = ColoringResult {
        num_colors: num_colors(&colors),
        colors,
        num_phases,
        serially_resolved,
        timings,
    };
    debug!(
        num_colors = result.num_colors,
        num_phases = result.num_phases,
        "distance-2 coloring complete"
    );
    Ok(result)
}

fn check_transpose_shape(graph: &CsrGraph, transpose: &CsrGraph) -> Result<()> {
    if transpose.num_rows() != graph.num_cols()
        || transpose.num_cols() != graph.num_rows()
        || transpose.num_edges() != graph.num_edges()
    {
        return Err(Error::TransposeMismatch {
            rows: graph.num_rows(),
            cols: graph.num_cols(),
            edges: graph.num_edges(),
            t_rows: transpose.num_rows(),
            t_cols: transpose.num_cols(),
            t_edges: transpose.num_edges(),
        });
    }
    Ok(())
}
