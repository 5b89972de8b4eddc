//! Index-only counting transpose.

use super::CsrGraph;

impl CsrGraph {
    /// Builds the transpose: a `num_cols x num_rows` graph where row `c` lists
    /// every row `r` with an entry `(r, c)`.
    ///
    /// Rows of the result are in ascending source order (stable scan).
    ///
    /// **Time complexity**: \(O(n + m)\)
    pub fn transpose(&self) -> CsrGraph {
        let rows = self.num_rows();
        let cols = self.num_cols();

        // Count entries per column.
        let mut counts = vec![0usize; cols];
        for &c in self.indices() {
            counts[c] += 1;
        }

        let mut offsets = Vec::with_capacity(cols + 1);
        offsets.push(0);
        let mut total = 0usize;
        for &count in &counts {
            total += count;
            offsets.push(total);
        }

        let mut indices = vec![0usize; total];
        let mut write_pos = offsets[..cols].to_vec();
        for r in 0..rows {
            for &c in self.neighbors(r) {
                indices[write_pos[c]] = r;
                write_pos[c] += 1;
            }
        }

        CsrGraph {
            num_cols: rows,
            offsets,
            indices,
        }
    }
}
