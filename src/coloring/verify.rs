//! Read-only validation of a finished distance-2 coloring.

use rayon::prelude::*;
use serde::Serialize;

use crate::graph::CsrGraph;

/// Outcome of [`verify_distance2`].
///
/// The flags are independent; `invalid` is `has_uncolored || has_conflict`.
/// A color above the vertex count is reported but does not by itself make the
/// coloring invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distance2Validation {
    /// Some vertex is uncolored or shares a color with a distance-2 neighbor.
    pub invalid: bool,
    /// Some vertex has color `0`.
    pub has_uncolored: bool,
    /// Some pair of distance-2 neighbors shares a color.
    pub has_conflict: bool,
    /// Some color exceeds the number of vertices.
    pub has_color_exceeding_vertex_count: bool,
}

impl Distance2Validation {
    /// `true` if the coloring is complete and conflict-free.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.invalid
    }

    fn merge(self, other: Self) -> Self {
        Self {
            invalid: self.invalid || other.invalid,
            has_uncolored: self.has_uncolored || other.has_uncolored,
            has_conflict: self.has_conflict || other.has_conflict,
            has_color_exceeding_vertex_count: self.has_color_exceeding_vertex_count
                || other.has_color_exceeding_vertex_count,
        }
    }
}

/// Recomputes, for every vertex, whether the coloring holds around it.
///
/// Nothing is mutated. Each conflicting vertex emits one `debug` event naming
/// the first neighbor it clashes with.
///
/// # Panics
/// Panics if `colors.len() != graph.num_rows()`.
pub fn verify_distance2(graph: &CsrGraph, transpose: &CsrGraph, colors: &[usize]) -> Distance2Validation {
    let nv = graph.num_rows();
    assert_eq!(colors.len(), nv, "one color per row expected");

    (0..nv)
        .into_par_iter()
        .map(|v| {
            let c = colors[v];
            let clash = graph.neighbors(v).iter().find_map(|&d1| {
                transpose
                    .neighbors(d1)
                    .iter()
                    .copied()
                    .find(|&d2| d2 != v && colors[d2] == c)
            });
            if let Some(other) = clash {
                tracing::debug!(vertex = v, other, color = c, "distance-2 color conflict");
            }
            Distance2Validation {
                invalid: c == 0 || clash.is_some(),
                has_uncolored: c == 0,
                has_conflict: clash.is_some(),
                has_color_exceeding_vertex_count: c > nv,
            }
        })
        .reduce(Distance2Validation::default, Distance2Validation::merge)
}
