//! Fixed-size cooperative worker teams over `std::thread::scope`.
//!
//! A team is a set of `size` scoped workers that share `&GhostToken<'brand>`
//! and one [`GhostBarrier`]. Every member runs the same closure and keeps its
//! control state (queue sizes, level counters) consistent with the others by
//! computing it from shared values read after a barrier. Members must therefore
//! execute the same number of `barrier()`/`single()` calls.

use core::ops::Range;

use crate::{concurrency::sync::GhostBarrier, GhostToken};

/// One worker's view of its team.
pub struct TeamMember<'t, 'brand> {
    rank: usize,
    size: usize,
    barrier: &'t GhostBarrier<'brand>,
    token: &'t GhostToken<'brand>,
}

impl<'t, 'brand> TeamMember<'t, 'brand> {
    /// This member's index in `0..size()`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of members in the team.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Blocks until every member has reached the same barrier.
    #[inline]
    pub fn barrier(&self) {
        self.barrier.wait(self.token);
    }

    /// Runs `f` on rank 0 only, then synchronizes the whole team.
    ///
    /// Writes made inside `f` are visible to every member after the call.
    pub fn single<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let out = if self.rank == 0 { Some(f()) } else { None };
        self.barrier();
        out
    }

    /// The contiguous slice `[rank*len/size, (rank+1)*len/size)` of a length-`len`
    /// range owned by this member.
    ///
    /// Computed without forming `rank * len`, so it cannot overflow.
    #[inline]
    pub fn work_range(&self, len: usize) -> Range<usize> {
        split_point(len, self.rank, self.size)..split_point(len, self.rank + 1, self.size)
    }
}

#[inline]
fn split_point(len: usize, part: usize, parts: usize) -> usize {
    let q = len / parts;
    let r = len % parts;
    q * part + r * part / parts
}

/// Runs `f` on a team of `size` scoped workers and collects each rank's result.
///
/// # Panics
/// Panics if `size == 0`, or re-raises a panic from any member.
pub fn run_team<'brand, R, F>(token: &GhostToken<'brand>, size: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(&TeamMember<'_, 'brand>) -> R + Sync,
{
    assert!(size != 0, "team size must be > 0");
    let barrier = GhostBarrier::new(size);

    std::thread::scope(|scope| {
        let barrier = &barrier;
        let f = &f;
        let handles: Vec<_> = (0..size)
            .map(|rank| {
                scope.spawn(move || {
                    let member = TeamMember {
                        rank,
                        size,
                        barrier,
                        token,
                    };
                    f(&member)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect()
    })
}

/// Default team size: available parallelism capped at 64 workers.
pub fn default_team_size() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(64)
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::Ordering;

    use super::*;
    use crate::concurrency::atomic::GhostAtomicUsize;

    #[test]
    fn work_ranges_partition_the_input() {
        for size in 1..9 {
            for len in [0usize, 1, 7, 64, 1001] {
                let mut covered = 0;
                let mut prev_end = 0;
                for rank in 0..size {
                    let r = split_point(len, rank, size)..split_point(len, rank + 1, size);
                    assert_eq!(r.start, prev_end);
                    covered += r.len();
                    prev_end = r.end;
                }
                assert_eq!(covered, len);
                assert_eq!(prev_end, len);
            }
        }
    }

    #[test]
    fn single_is_visible_after_barrier() {
        GhostToken::new(|token| {
            let slot = GhostAtomicUsize::new(0);
            let seen = run_team(&token, 4, |m| {
                m.single(|| slot.store(42, Ordering::Relaxed));
                slot.load(Ordering::Relaxed)
            });
            assert_eq!(seen, vec![42; 4]);
        });
    }

    #[test]
    fn ranks_are_distinct() {
        GhostToken::new(|token| {
            let mut ranks = run_team(&token, 5, |m| (m.rank(), m.size()));
            ranks.sort_unstable();
            assert_eq!(ranks, (0..5).map(|r| (r, 5)).collect::<Vec<_>>());
        });
    }
}
