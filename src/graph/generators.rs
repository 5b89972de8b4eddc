//! Synthetic symmetric graphs for benchmarks, reports and tests.
//!
//! All generators are deterministic; the random ones take an explicit seed.

use super::CsrGraph;

/// Small xorshift generator; not for anything but reproducible test data.
struct XorShift64 {
    a: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self {
            a: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.a;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.a = x;
        x
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

/// `n` vertices, `v` joined to every `v + d` for `d` in `1..=band`.
pub fn banded(n: usize, band: usize) -> CsrGraph {
    let mut edges = Vec::with_capacity(n * band);
    for v in 0..n {
        for d in 1..=band {
            if v + d < n {
                edges.push((v, v + d));
            }
        }
    }
    CsrGraph::from_edges(n, &edges)
}

/// Center `0` joined to leaves `1..=leaves`.
pub fn star(leaves: usize) -> CsrGraph {
    let edges: Vec<_> = (1..=leaves).map(|leaf| (0, leaf)).collect();
    CsrGraph::from_edges(leaves + 1, &edges)
}

/// `rows x cols` 4-neighbor grid, vertices numbered row-major.
pub fn grid(rows: usize, cols: usize) -> CsrGraph {
    let id = |r: usize, c: usize| r * cols + c;
    let mut edges = Vec::with_capacity(2 * rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                edges.push((id(r, c), id(r, c + 1)));
            }
            if r + 1 < rows {
                edges.push((id(r, c), id(r + 1, c)));
            }
        }
    }
    CsrGraph::from_edges(rows * cols, &edges)
}

/// `count` disjoint complete graphs of `size` vertices each, laid out
/// consecutively.
pub fn disjoint_cliques(count: usize, size: usize) -> CsrGraph {
    let mut edges = Vec::new();
    for k in 0..count {
        let base = k * size;
        for u in 0..size {
            for v in u + 1..size {
                edges.push((base + u, base + v));
            }
        }
    }
    CsrGraph::from_edges(count * size, &edges)
}

/// About `n * avg_degree / 2` uniformly random undirected edges, self-loops
/// dropped.
pub fn random(n: usize, avg_degree: usize, seed: u64) -> CsrGraph {
    if n < 2 {
        return CsrGraph::from_edges(n, &[]);
    }
    let mut rng = XorShift64::new(seed);
    let edges: Vec<_> = (0..n * avg_degree / 2)
        .map(|_| (rng.below(n), rng.below(n)))
        .filter(|(u, v)| u != v)
        .collect();
    CsrGraph::from_edges(n, &edges)
}

/// Relabels `graph` with a random permutation, destroying any locality of the
/// original numbering.
pub fn shuffled(graph: &CsrGraph, seed: u64) -> CsrGraph {
    let n = graph.num_rows();
    let mut rng = XorShift64::new(seed);
    let mut relabel: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        relabel.swap(i, rng.below(i + 1));
    }

    let edges: Vec<_> = (0..n)
        .flat_map(|u| graph.neighbors(u).iter().map(move |&v| (u, v)))
        .map(|(u, v)| (relabel[u], relabel[v]))
        .collect();
    CsrGraph::from_edges(n, &edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_have_expected_sizes() {
        assert_eq!(banded(6, 2).num_edges(), 2 * (5 + 4));
        assert_eq!(star(5).degree(0), 5);
        assert_eq!(grid(3, 4).num_edges(), 2 * (3 * 3 + 2 * 4));
        assert_eq!(disjoint_cliques(3, 4).num_edges(), 3 * 4 * 3);
    }

    #[test]
    fn generated_graphs_are_symmetric() {
        for g in [banded(20, 3), grid(4, 5), random(50, 6, 7), shuffled(&grid(3, 3), 11)] {
            assert!(g.is_symmetric());
        }
    }

    #[test]
    fn random_is_reproducible() {
        assert_eq!(random(100, 4, 42), random(100, 4, 42));
        assert_eq!(shuffled(&star(9), 3).num_edges(), star(9).num_edges());
    }
}
