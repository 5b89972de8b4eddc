//! Speculative greedy coloring of the current work list.
//!
//! Every listed vertex picks the smallest color not used by any of its
//! distance-2 neighbors, reading their colors while other workers may be
//! writing them. Stale reads produce conflicts, which the next detection pass
//! finds and uncolors. Colors are `1`-based; `0` means uncolored.
//!
//! Distance-2 neighbors of `v` are reached as `t.neighbors(d1)` for each `d1`
//! in `g.neighbors(v)`: the vertices joined to `v` by a path of exactly two
//! edges. For a `rows x cols` pattern they are the rows sharing a column with
//! `v`. A vertex reached back to itself is never a constraint.

use core::sync::atomic::Ordering;

use rayon::prelude::*;

use super::config::Distance2Algorithm;
use crate::{concurrency::atomic::GhostAtomicUsize, graph::CsrGraph};

/// Colors covered by one forbidden window.
pub(crate) const WINDOW: usize = 64;

/// Private reorderable copy of the forward indices, used by edge filtering.
///
/// Each vertex only ever permutes its own row, so rows never overlap between
/// workers. The atomics exist so the copy can be shared across the pool.
pub(crate) struct FilteredRows<'brand> {
    entries: Vec<GhostAtomicUsize<'brand>>,
}

impl<'brand> FilteredRows<'brand> {
    pub(crate) fn new(graph: &CsrGraph) -> Self {
        Self {
            entries: graph
                .indices()
                .par_iter()
                .map(|&c| GhostAtomicUsize::new(c))
                .collect(),
        }
    }

    #[inline]
    fn get(&self, pos: usize) -> usize {
        self.entries[pos].load(Ordering::Relaxed)
    }

    #[inline]
    fn swap(&self, a: usize, b: usize) {
        let (x, y) = (self.get(a), self.get(b));
        self.entries[a].store(y, Ordering::Relaxed);
        self.entries[b].store(x, Ordering::Relaxed);
    }
}

/// Shared inputs of one speculative pass.
pub(crate) struct Speculation<'a, 'brand> {
    pub(crate) graph: &'a CsrGraph,
    pub(crate) transpose: &'a CsrGraph,
    pub(crate) colors: &'a [GhostAtomicUsize<'brand>],
    pub(crate) filtered: Option<&'a FilteredRows<'brand>>,
}

impl<'a, 'brand> Speculation<'a, 'brand> {
    /// Colors every listed vertex that is still uncolored.
    pub(crate) fn color_list(
        &self,
        algorithm: Distance2Algorithm,
        list: &[GhostAtomicUsize<'brand>],
        chunk: usize,
    ) {
        list.par_iter().with_min_len(chunk).for_each(|slot| {
            let v = slot.load(Ordering::Relaxed);
            if self.colors[v].load(Ordering::Relaxed) != 0 {
                return;
            }
            match algorithm {
                Distance2Algorithm::Vb => self.color_vertex_plain(v),
                Distance2Algorithm::VbBit => self.color_vertex_bitmask(v),
                Distance2Algorithm::VbBitEf => match self.filtered {
                    Some(rows) => self.color_vertex_filtered(v, rows),
                    None => self.color_vertex_bitmask(v),
                },
            }
        });
    }

    #[inline]
    fn color_of(&self, v: usize) -> usize {
        self.colors[v].load(Ordering::Relaxed)
    }

    #[inline]
    fn assign(&self, v: usize, color: usize) {
        self.colors[v].store(color, Ordering::Relaxed);
    }

    /// Boolean window `[offset, offset + 64)`; slot `0` of the first window is
    /// pre-forbidden since `0` is not a color.
    fn color_vertex_plain(&self, v: usize) {
        let nv = self.graph.num_rows();
        let mut offset = 0;
        // Color `nv` may be needed, and it lives in the window starting at `nv`
        // when `nv` is a multiple of the window size.
        while offset <= nv {
            let mut forbidden = [false; WINDOW];
            if offset == 0 {
                forbidden[0] = true;
            }

            for &d1 in self.graph.neighbors(v) {
                for &d2 in self.transpose.neighbors(d1) {
                    if d2 == v {
                        continue;
                    }
                    let c = self.color_of(d2);
                    if c >= offset && c - offset < WINDOW {
                        forbidden[c - offset] = true;
                    }
                }
            }

            if let Some(slot) = forbidden.iter().position(|&f| !f) {
                self.assign(v, offset + slot);
                return;
            }
            offset += WINDOW;
        }
    }

    /// Bitmask window `(offset, offset + 64]`, bit `c - offset - 1` for color `c`.
    fn color_vertex_bitmask(&self, v: usize) {
        let nv = self.graph.num_rows();
        let mut offset = 0;
        while offset <= nv + WINDOW {
            let mut forbidden = 0u64;

            'scan: for &d1 in self.graph.neighbors(v) {
                for &d2 in self.transpose.neighbors(d1) {
                    if d2 == v {
                        continue;
                    }
                    let c = self.color_of(d2);
                    if c > offset && c - offset <= WINDOW {
                        forbidden |= 1u64 << (c - offset - 1);
                        if forbidden == u64::MAX {
                            break 'scan;
                        }
                    }
                }
            }

            if let Some(color) = lowest_free(forbidden, offset) {
                self.assign(v, color);
                return;
            }
            offset += WINDOW;
        }
    }

    /// Bitmask scan that also moves fully-resolved forward entries out of the
    /// way.
    ///
    /// A forward neighbor `d1` whose transpose row only holds colors at or
    /// below the current window's upper bound (or `v` itself) cannot forbid
    /// anything in a later window. It is swapped to the front of the row's
    /// unfiltered region and skipped by the remaining windows of this attempt.
    fn color_vertex_filtered(&self, v: usize, rows: &FilteredRows<'brand>) {
        let nv = self.graph.num_rows();
        let row = self.graph.row_range(v);
        let mut begin = row.start;
        let mut offset = 0;

        while offset <= nv + WINDOW {
            let mut forbidden = 0u64;
            let mut full = false;

            let mut pos = begin;
            while !full && pos < row.end {
                let d1 = rows.get(pos);
                let t_row = self.transpose.neighbors(d1);
                let mut resolved = 0;

                for &d2 in t_row {
                    if full {
                        break;
                    }
                    if d2 == v {
                        resolved += 1;
                        continue;
                    }
                    let c = self.color_of(d2);
                    if c != 0 && c <= offset + WINDOW {
                        resolved += 1;
                        if c > offset {
                            forbidden |= 1u64 << (c - offset - 1);
                            full = forbidden == u64::MAX;
                        }
                    }
                }

                if resolved == t_row.len() {
                    if pos > begin {
                        rows.swap(pos, begin);
                    }
                    begin += 1;
                }
                pos += 1;
            }

            if let Some(color) = lowest_free(forbidden, offset) {
                self.assign(v, color);
                return;
            }
            offset += WINDOW;
        }
    }
}

/// Smallest color in `(offset, offset + 64]` whose bit is clear.
#[inline]
fn lowest_free(forbidden: u64, offset: usize) -> Option<usize> {
    let free = !forbidden;
    (free != 0).then(|| offset + free.trailing_zeros() as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{concurrency::atomic, GhostToken};

    fn run(graph: &CsrGraph, algorithm: Distance2Algorithm, preset: &[usize]) -> Vec<usize> {
        let t = graph.transpose();
        GhostToken::new(|_token| {
            let colors = atomic::atomic_vec_from(preset);
            let filtered = algorithm.uses_edge_filtering().then(|| FilteredRows::new(graph));
            let pass = Speculation {
                graph,
                transpose: &t,
                colors: &colors,
                filtered: filtered.as_ref(),
            };
            // One vertex at a time keeps the pass deterministic.
            for v in 0..graph.num_rows() {
                let list = atomic::atomic_vec_from(&[v]);
                pass.color_list(algorithm, &list, 1);
            }
            atomic::into_plain(colors)
        })
    }

    #[test]
    fn lowest_free_picks_first_clear_bit() {
        assert_eq!(lowest_free(0, 0), Some(1));
        assert_eq!(lowest_free(0b1011, 0), Some(3));
        assert_eq!(lowest_free(0, 64), Some(65));
        assert_eq!(lowest_free(u64::MAX, 0), None);
    }

    #[test]
    fn sequential_path_coloring_is_greedy() {
        // Adjacent vertices share no common neighbor on a path, so only the
        // pairs two hops apart must differ.
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        for algorithm in Distance2Algorithm::ALL {
            assert_eq!(run(&g, algorithm, &[0; 4]), vec![1, 1, 2, 2], "{algorithm}");
        }
    }

    #[test]
    fn precolored_vertices_are_left_alone() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)]);
        for algorithm in Distance2Algorithm::ALL {
            assert_eq!(run(&g, algorithm, &[7, 0, 0]), vec![7, 1, 1], "{algorithm}");
        }
    }

    #[test]
    fn colors_beyond_first_window_are_found() {
        // A star with 70 leaves: leaves are pairwise at distance 2.
        let edges: Vec<_> = (1..=70).map(|leaf| (0, leaf)).collect();
        let g = CsrGraph::from_edges(71, &edges);
        for algorithm in Distance2Algorithm::ALL {
            let colors = run(&g, algorithm, &[0; 71]);
            assert_eq!(colors[0], 1, "{algorithm}");
            assert_eq!(colors[1..], (1..=70).collect::<Vec<_>>(), "{algorithm}");
        }
    }

    #[test]
    fn filtering_only_permutes_rows() {
        let g = CsrGraph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (3, 4), (1, 2)]);
        let t = g.transpose();
        GhostToken::new(|_token| {
            let colors = atomic::atomic_vec(g.num_rows(), 0);
            let rows = FilteredRows::new(&g);
            let pass = Speculation {
                graph: &g,
                transpose: &t,
                colors: &colors,
                filtered: Some(&rows),
            };
            let list = atomic::atomic_vec_from(&[0, 1, 2, 3, 4]);
            pass.color_list(Distance2Algorithm::VbBitEf, &list, 1);

            for v in 0..g.num_rows() {
                let mut got: Vec<_> = g.row_range(v).map(|p| rows.get(p)).collect();
                got.sort_unstable();
                assert_eq!(got, g.neighbors(v));
            }
        });
    }
}
