//! Starting-vertex selection.

use rayon::prelude::*;

use crate::graph::CsrGraph;

/// A pseudo-peripheral start vertex: the lowest-index vertex of minimum degree.
///
/// Returns `None` for a graph without vertices.
pub fn find_peripheral(graph: &CsrGraph) -> Option<usize> {
    (0..graph.num_rows())
        .into_par_iter()
        .min_by_key(|&v| (graph.degree(v), v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_index_wins_ties() {
        let g = CsrGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (1, 3)]);
        assert_eq!(find_peripheral(&g), Some(0));

        let g = CsrGraph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (2, 3)]);
        assert_eq!(find_peripheral(&g), Some(1));
    }

    #[test]
    fn empty_graph_has_none() {
        assert_eq!(find_peripheral(&CsrGraph::from_edges(0, &[])), None);
    }
}
