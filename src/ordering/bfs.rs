//! Team-parallel breadth-first search producing a level structure.
//!
//! The frontier lives in one of two queue buffers and the next frontier is
//! built in the other. Every member takes a contiguous slice of the frontier
//! and processes it one vertex per batch step. In each step a member claims
//! the unvisited neighbors of its vertex by compare-and-swap, publishes how
//! many it claimed, and after a barrier writes them at the offset given by
//! the counts of lower ranks. All members run the same number of steps per
//! frontier so the barriers line up.

use core::sync::atomic::Ordering;

use crate::{
    concurrency::{
        atomic::{self, GhostAtomicUsize},
        run_team, CachePadded, TeamMember,
    },
    graph::CsrGraph,
    GhostToken,
};

use super::levels::LevelStructure;

/// Visit marker of a vertex no member has reached.
pub(crate) const NOT_VISITED: usize = usize::MAX;
/// Visit marker of a vertex sitting in the next frontier.
const QUEUED: usize = usize::MAX - 1;

/// Upper bound on team size.
pub const MAX_TEAM_SIZE: usize = 64;

struct BfsState<'a, 'brand> {
    graph: &'a CsrGraph,
    start: usize,
    visit: &'a [GhostAtomicUsize<'brand>],
    queues: &'a [Vec<GhostAtomicUsize<'brand>>; 2],
    counts: &'a [CachePadded<GhostAtomicUsize<'brand>>],
}

/// Computes BFS levels of every vertex of `graph`, starting from `start`.
///
/// When the frontier empties before every vertex is reached, the search
/// resumes from the highest-index unvisited vertex in a new level. The result
/// therefore always covers the whole graph.
///
/// `team_size` is clamped to `1..=MAX_TEAM_SIZE`.
///
/// # Panics
/// Panics if `start >= graph.num_rows()`.
pub fn parallel_bfs(graph: &CsrGraph, start: usize, team_size: usize) -> LevelStructure {
    let n = graph.num_rows();
    assert!(start < n, "start vertex {start} out of bounds for {n} vertices");
    let team_size = team_size.clamp(1, MAX_TEAM_SIZE);

    GhostToken::new(|token| {
        let visit = atomic::atomic_vec(n, NOT_VISITED);
        let queues = [atomic::atomic_vec(n, 0), atomic::atomic_vec(n, 0)];
        let counts: Vec<_> = (0..team_size)
            .map(|_| CachePadded::new(GhostAtomicUsize::new(0)))
            .collect();
        let state = BfsState {
            graph,
            start,
            visit: &visit,
            queues: &queues,
            counts: &counts,
        };

        let num_levels = run_team(&token, team_size, |member| state.run(member))
            .first()
            .copied()
            .unwrap_or(0);

        LevelStructure::from_levels(&atomic::into_plain(visit), num_levels)
    })
}

impl<'a, 'brand> BfsState<'a, 'brand> {
    /// One member's share of the search. Returns the number of levels.
    fn run(&self, member: &TeamMember<'_, 'brand>) -> usize {
        let n = self.graph.num_rows();
        let (rank, size) = (member.rank(), member.size());
        let mut claimed = Vec::new();

        // Control state is private to each member but evolves identically.
        let mut active = 0;
        let mut active_len = 1;
        let mut visited = 0;
        let mut level = 0;

        member.single(|| {
            self.queues[active][0].store(self.start, Ordering::Relaxed);
            self.visit[self.start].store(QUEUED, Ordering::Relaxed);
        });

        while visited < n {
            member.barrier();
            let next = 1 - active;
            let work = member.work_range(active_len);
            let max_batch = active_len.div_ceil(size);
            let mut next_len = 0;

            for step in 0..max_batch {
                claimed.clear();
                let process = (step < work.len())
                    .then(|| self.queues[active][work.start + step].load(Ordering::Relaxed));
                if let Some(v) = process {
                    for &w in self.graph.neighbors(v) {
                        if self.visit[w].claim(NOT_VISITED, QUEUED) {
                            claimed.push(w);
                        }
                    }
                }
                self.counts[rank].store(claimed.len(), Ordering::Relaxed);
                member.barrier();

                let before: usize = self.counts[..rank]
                    .iter()
                    .map(|c| c.load(Ordering::Relaxed))
                    .sum();
                let total: usize = before
                    + self.counts[rank..]
                        .iter()
                        .map(|c| c.load(Ordering::Relaxed))
                        .sum::<usize>();

                let out = &self.queues[next][next_len + before..];
                for (slot, &w) in out.iter().zip(&claimed) {
                    slot.store(w, Ordering::Relaxed);
                }
                if let Some(v) = process {
                    self.visit[v].store(level, Ordering::Relaxed);
                }
                next_len += total;
                member.barrier();
            }

            visited += active_len;
            active = next;
            active_len = next_len;

            if visited < n && active_len == 0 {
                member.single(|| self.restart(active));
                active_len = 1;
            }
            level += 1;
        }
        level
    }

    /// Seeds `queues[active]` with the highest-index unvisited vertex.
    fn restart(&self, active: usize) {
        if let Some(v) = (0..self.visit.len())
            .rev()
            .find(|&v| self.visit[v].load(Ordering::Relaxed) == NOT_VISITED)
        {
            tracing::trace!(vertex = v, "bfs restart in new component");
            self.queues[active][0].store(v, Ordering::Relaxed);
            self.visit[v].store(QUEUED, Ordering::Relaxed);
        }
    }
}
