//! Level-synchronous Cuthill-McKee labeling.
//!
//! Levels are labeled in BFS order. Inside a level, vertices are ordered by
//! the smallest label among their neighbors, then by degree, then by their
//! position in the level. Both criteria are packed into one score
//! `min_neighbor_label * (max_degree + 1) + degree`, so a single stable radix
//! sort per level yields the order.

use core::sync::atomic::Ordering;

use crate::{
    concurrency::{
        atomic::{self, GhostAtomicU64, GhostAtomicUsize},
        run_team, TeamMember,
    },
    graph::CsrGraph,
    GhostToken,
};

use super::{bfs::NOT_VISITED, levels::LevelStructure, radix::radix_sort_keys_and_values};

/// Rank 0's private sort buffers, sized for the widest level.
struct SortScratch {
    keys: Vec<u64>,
    keys_aux: Vec<u64>,
    values: Vec<usize>,
    values_aux: Vec<usize>,
}

impl SortScratch {
    fn new(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            keys_aux: vec![0; capacity],
            values: Vec::with_capacity(capacity),
            values_aux: vec![0; capacity],
        }
    }

    /// Sorts `members` by `scores` in place.
    fn sort_level<'brand>(&mut self, scores: &[GhostAtomicU64<'brand>], members: &[GhostAtomicUsize<'brand>]) {
        self.keys.clear();
        self.keys.extend(scores.iter().map(|s| s.load(Ordering::Relaxed)));
        self.values.clear();
        self.values.extend(atomic::snapshot(members));

        radix_sort_keys_and_values(&mut self.keys, &mut self.keys_aux, &mut self.values, &mut self.values_aux);

        for (slot, &v) in members.iter().zip(&self.values) {
            slot.store(v, Ordering::Relaxed);
        }
    }
}

struct Labeling<'a, 'brand> {
    graph: &'a CsrGraph,
    levels: &'a LevelStructure,
    max_degree: u64,
    labels: &'a [GhostAtomicUsize<'brand>],
    members: &'a [GhostAtomicUsize<'brand>],
    scores: &'a [GhostAtomicU64<'brand>],
}

/// Cuthill-McKee label of every vertex, in `0..num_rows`.
///
/// Labels increase level by level, so a vertex in level `l` is labeled after
/// every vertex of levels `< l`.
pub(crate) fn cuthill_mckee_labels(graph: &CsrGraph, levels: &LevelStructure, team_size: usize) -> Vec<usize> {
    let n = graph.num_rows();
    debug_assert_eq!(levels.num_vertices(), n);

    GhostToken::new(|token| {
        let labels = atomic::atomic_vec(n, NOT_VISITED);
        let members = atomic::atomic_vec_from(levels.members());
        let scores: Vec<_> = (0..levels.max_level_size()).map(|_| GhostAtomicU64::new(0)).collect();
        let labeling = Labeling {
            graph,
            levels,
            max_degree: graph.max_degree() as u64,
            labels: &labels,
            members: &members,
            scores: &scores,
        };

        run_team(&token, team_size, |member| labeling.run(member));
        atomic::into_plain(labels)
    })
}

impl<'a, 'brand> Labeling<'a, 'brand> {
    fn run(&self, member: &TeamMember<'_, 'brand>) {
        let n = self.graph.num_rows();
        let mut scratch = (member.rank() == 0).then(|| SortScratch::new(self.levels.max_level_size()));
        let mut labeled = 0;

        for level in 0..self.levels.num_levels() {
            let range = self.levels.level_range(level);
            let len = range.len();
            let members = &self.members[range];
            let work = member.work_range(len);

            for i in work.clone() {
                let v = members[i].load(Ordering::Relaxed);
                self.scores[i].store(self.score(v, n), Ordering::Relaxed);
            }
            member.barrier();

            member.single(|| {
                if let Some(scratch) = scratch.as_mut() {
                    scratch.sort_level(&self.scores[..len], members);
                }
            });

            for i in work {
                let v = members[i].load(Ordering::Relaxed);
                self.labels[v].store(labeled + i, Ordering::Relaxed);
            }
            labeled += len;
            member.barrier();
        }
    }

    /// Unlabeled neighbors count as label `n`.
    fn score(&self, v: usize, n: usize) -> u64 {
        let min_label = self
            .graph
            .neighbors(v)
            .iter()
            .map(|&w| self.labels[w].load(Ordering::Relaxed).min(n))
            .min()
            .unwrap_or(n);
        min_label as u64 * (self.max_degree + 1) + self.graph.degree(v) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::bfs::parallel_bfs;

    #[test]
    fn siblings_follow_parent_then_degree() {
        //     0
        //   /   \
        //  1     2
        //  |    / \
        //  3   4   5
        // 2 has the higher degree, so with equal parents 1 is labeled first.
        let g = CsrGraph::from_edges(6, &[(0, 1), (0, 2), (1, 3), (2, 4), (2, 5)]);
        for team in [1, 2, 4] {
            let levels = parallel_bfs(&g, 0, team);
            let labels = cuthill_mckee_labels(&g, &levels, team);
            assert_eq!(labels, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn lower_labeled_parent_wins_over_degree() {
        // Level 2 holds 3 (child of 1) and 4 (child of 2); 3 has more
        // neighbors but its parent is labeled first.
        let g = CsrGraph::from_edges(
            10,
            &[(0, 1), (0, 2), (1, 3), (2, 4), (3, 7), (3, 8), (3, 9), (4, 5)],
        );
        let levels = parallel_bfs(&g, 0, 2);
        let labels = cuthill_mckee_labels(&g, &levels, 2);
        assert!(labels[3] < labels[4]);
        assert_eq!(labels[0], 0);
    }

    #[test]
    fn labels_form_a_bijection() {
        let g = CsrGraph::from_edges(8, &[(0, 1), (2, 3), (3, 4), (4, 2), (6, 7)]);
        let levels = parallel_bfs(&g, 5, 3);
        let mut labels = cuthill_mckee_labels(&g, &levels, 3);
        labels.sort_unstable();
        assert_eq!(labels, (0..8).collect::<Vec<_>>());
    }
}
