//! Parallel reverse Cuthill-McKee (RCM) reordering.
//!
//! The pipeline is:
//!
//! 1. pick a low-degree start vertex ([`find_peripheral`]),
//! 2. build BFS levels with a cooperating team ([`parallel_bfs`]),
//! 3. label each level in Cuthill-McKee order, one radix sort per level,
//! 4. reverse the labels.
//!
//! Disconnected graphs are handled by the BFS restarting in each unreached
//! component, so the result is always a permutation of all vertices.
//!
//! ```rust
//! use spargraph::{reverse_cuthill_mckee, CsrGraph, RcmConfig};
//!
//! let g = CsrGraph::from_edges(4, &[(0, 3), (3, 1), (1, 2)]);
//! let rcm = reverse_cuthill_mckee(&g, &RcmConfig::default()).unwrap();
//!
//! assert_eq!(g.bandwidth(None), 3);
//! assert_eq!(g.bandwidth(Some(rcm.order())), 1);
//! ```

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    concurrency::team::default_team_size,
    error::{Error, Result},
    graph::CsrGraph,
};

pub mod bfs;
mod cuthill_mckee;
pub mod levels;
pub mod peripheral;
pub mod radix;

pub use bfs::{parallel_bfs, MAX_TEAM_SIZE};
pub use levels::LevelStructure;
pub use peripheral::find_peripheral;
pub use radix::radix_sort_keys_and_values;

/// Parameters of one [`reverse_cuthill_mckee`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RcmConfig {
    /// Workers in the BFS and labeling teams. `None` uses the available
    /// parallelism; any value is capped at [`MAX_TEAM_SIZE`].
    pub team_size: Option<usize>,
    /// Emit per-phase `debug` events with timings.
    pub verbose: bool,
}

impl RcmConfig {
    /// Sets an explicit team size.
    pub fn with_team_size(mut self, team_size: usize) -> Self {
        self.team_size = Some(team_size);
        self
    }

    /// Enables or disables per-phase logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `team_size` is `Some(0)`.
    pub fn validate(&self) -> Result<()> {
        if self.team_size == Some(0) {
            return Err(Error::invalid_config("team_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if the document does not parse or fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::invalid_config("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Team size actually used.
    pub fn resolved_team_size(&self) -> usize {
        self.team_size.unwrap_or_else(default_team_size).clamp(1, MAX_TEAM_SIZE)
    }
}

/// Output of [`reverse_cuthill_mckee`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RcmOrdering {
    order: Vec<usize>,
    num_levels: usize,
    start_vertex: Option<usize>,
}

impl RcmOrdering {
    /// New position of every vertex: vertex `v` moves to `order()[v]`.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the ordering and returns the position array.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Number of BFS levels, counting one extra level per restart.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// The vertex the BFS started from, `None` for an empty graph.
    #[inline]
    pub fn start_vertex(&self) -> Option<usize> {
        self.start_vertex
    }

    /// The inverse of [`order`](Self::order): the vertex placed at each position.
    pub fn permutation(&self) -> Vec<usize> {
        let mut perm = vec![0; self.order.len()];
        for (v, &pos) in self.order.iter().enumerate() {
            perm[pos] = v;
        }
        perm
    }
}

/// Computes a reverse Cuthill-McKee ordering of a square graph.
///
/// The graph is treated as undirected; pass a symmetric pattern for the
/// classic bandwidth guarantee.
///
/// # Errors
/// - [`Error::InvalidConfig`] if `config` fails validation.
/// - [`Error::MalformedCsr`] if the graph is not square.
#[tracing::instrument(skip_all, fields(rows = graph.num_rows(), entries = graph.num_edges()))]
pub fn reverse_cuthill_mckee(graph: &CsrGraph, config: &RcmConfig) -> Result<RcmOrdering> {
    config.validate()?;
    let n = graph.num_rows();
    if n != graph.num_cols() {
        return Err(Error::malformed(format!(
            "ordering needs a square graph, got {n}x{}",
            graph.num_cols()
        )));
    }

    let Some(start) = find_peripheral(graph) else {
        return Ok(RcmOrdering {
            order: Vec::new(),
            num_levels: 0,
            start_vertex: None,
        });
    };
    let team_size = config.resolved_team_size();

    let timer = config.verbose.then(Instant::now);
    let levels = parallel_bfs(graph, start, team_size);
    if let Some(timer) = timer {
        debug!(
            start,
            team_size,
            num_levels = levels.num_levels(),
            max_level_size = levels.max_level_size(),
            elapsed = ?timer.elapsed(),
            "bfs levels"
        );
    }

    let timer = config.verbose.then(Instant::now);
    let mut order = cuthill_mckee::cuthill_mckee_labels(graph, &levels, team_size);
    if let Some(timer) = timer {
        debug!(elapsed = ?timer.elapsed(), "cuthill-mckee labels");
    }

    order.par_iter_mut().for_each(|label| *label = n - *label - 1);

    Ok(RcmOrdering {
        order,
        num_levels: levels.num_levels(),
        start_vertex: Some(start),
    })
}
