//! Coloring diagnostics: color counts and distance-2 degrees.

use rayon::prelude::*;

use crate::graph::CsrGraph;

/// Largest color used, `0` if nothing is colored.
pub fn num_colors(colors: &[usize]) -> usize {
    colors.par_iter().copied().max().unwrap_or(0)
}

/// `histogram[c]` is the number of vertices with color `c`; index `0` counts
/// uncolored vertices.
///
/// Returns `None` if any color exceeds `colors.len()`, the bound every proper
/// coloring satisfies, so the histogram never holds more than `len + 1` slots.
pub fn color_histogram(colors: &[usize]) -> Option<Vec<usize>> {
    let max = num_colors(colors);
    if max > colors.len() {
        return None;
    }
    let mut histogram = vec![0; max + 1];
    for &c in colors {
        histogram[c] += 1;
    }
    Some(histogram)
}

/// Number of distinct distance-2 neighbors of every row, excluding the row itself.
///
/// Each rayon worker keeps one stamp array of length `graph.num_rows()`.
pub fn distance2_degree(graph: &CsrGraph, transpose: &CsrGraph) -> Vec<usize> {
    let nv = graph.num_rows();
    (0..nv)
        .into_par_iter()
        .map_init(
            || vec![usize::MAX; nv],
            |seen, v| {
                let mut degree = 0;
                for &d1 in graph.neighbors(v) {
                    for &d2 in transpose.neighbors(d1) {
                        if d2 != v && seen[d2] != v {
                            seen[d2] = v;
                            degree += 1;
                        }
                    }
                }
                degree
            },
        )
        .collect()
}

/// Largest entry of [`distance2_degree`]; a lower bound on colors needed is one more.
pub fn max_distance2_degree(graph: &CsrGraph, transpose: &CsrGraph) -> usize {
    distance2_degree(graph, transpose).into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_rejects_colors_beyond_vertex_count() {
        assert_eq!(color_histogram(&[1, usize::MAX]), None);
        assert_eq!(color_histogram(&[3, 1]), None);
        assert_eq!(color_histogram(&[2, 1]), Some(vec![0, 1, 1]));
    }

    #[test]
    fn histogram_counts_every_color() {
        assert_eq!(color_histogram(&[1, 2, 1, 0, 3]), Some(vec![1, 2, 1, 1]));
        assert_eq!(color_histogram(&[]), Some(vec![0]));
        assert_eq!(num_colors(&[2, 5, 1]), 5);
    }

    #[test]
    fn star_degrees() {
        let edges: Vec<_> = (1..=4).map(|leaf| (0, leaf)).collect();
        let g = CsrGraph::from_edges(5, &edges);
        let t = g.transpose();
        assert_eq!(distance2_degree(&g, &t), vec![0, 3, 3, 3, 3]);
        assert_eq!(max_distance2_degree(&g, &t), 3);
    }

    #[test]
    fn bipartite_rows_sharing_a_column() {
        // rows 0 and 1 share column 2; row 2 is alone.
        let g = CsrGraph::from_csr_parts(4, vec![0, 2, 3, 4], vec![0, 2, 2, 3]).unwrap();
        let t = g.transpose();
        assert_eq!(distance2_degree(&g, &t), vec![1, 1, 0]);
    }
}
