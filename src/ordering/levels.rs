//! BFS level structures in CSR form.

use core::ops::Range;

/// Vertices partitioned by BFS level.
///
/// `level(l)` is `members[offsets[l]..offsets[l + 1]]`. Every vertex appears in
/// exactly one level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelStructure {
    offsets: Vec<usize>,
    members: Vec<usize>,
}

impl LevelStructure {
    /// Buckets vertices by `levels[v]` with a stable counting pass, so each
    /// level lists its vertices in ascending order.
    ///
    /// # Panics
    /// Panics if any entry is `>= num_levels`.
    pub fn from_levels(levels: &[usize], num_levels: usize) -> Self {
        let mut offsets = vec![0usize; num_levels + 1];
        for (v, &l) in levels.iter().enumerate() {
            assert!(l < num_levels, "vertex {v} has level {l}, expected < {num_levels}");
            offsets[l + 1] += 1;
        }
        for l in 0..num_levels {
            offsets[l + 1] += offsets[l];
        }

        let mut cursor = offsets[..num_levels].to_vec();
        let mut members = vec![0usize; levels.len()];
        for (v, &l) in levels.iter().enumerate() {
            members[cursor[l]] = v;
            cursor[l] += 1;
        }

        Self { offsets, members }
    }

    /// Number of levels.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Number of vertices across all levels.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.members.len()
    }

    /// Position range of level `l` inside [`members`](Self::members).
    #[inline]
    pub fn level_range(&self, l: usize) -> Range<usize> {
        self.offsets[l]..self.offsets[l + 1]
    }

    /// Vertices of level `l`.
    #[inline]
    pub fn level(&self, l: usize) -> &[usize] {
        &self.members[self.level_range(l)]
    }

    /// Level offsets, length `num_levels() + 1`.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// All vertices, level by level.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Size of the widest level, `0` if there are none.
    pub fn max_level_size(&self) -> usize {
        self.offsets.windows(2).map(|w| w[1] - w[0]).max().unwrap_or(0)
    }

    /// Level of every vertex.
    pub fn level_of_vertex(&self) -> Vec<usize> {
        let mut level_of = vec![0; self.members.len()];
        for l in 0..self.num_levels() {
            for &v in self.level(l) {
                level_of[v] = l;
            }
        }
        level_of
    }
}
