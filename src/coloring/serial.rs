//! Single-threaded fallback for vertices still conflicting at the iteration cap.

use crate::graph::CsrGraph;

/// Greedily colors every still-uncolored vertex of `list`, in list order.
///
/// `forbidden[c] == v` marks color `c` as taken while `v` is being colored, so
/// the array is never cleared between vertices. It holds slots for colors
/// `0..=nv + 1`; a neighbor color outside that range cannot collide with any
/// color this pass chooses and is skipped. Returns the number of vertices
/// colored.
pub(crate) fn resolve_conflicts_serial(
    graph: &CsrGraph,
    transpose: &CsrGraph,
    colors: &mut [usize],
    list: &[usize],
) -> usize {
    let nv = graph.num_rows();
    let mut forbidden = vec![usize::MAX; nv + 2];
    let mut resolved = 0;

    for &v in list {
        if colors[v] != 0 {
            continue;
        }
        for &d1 in graph.neighbors(v) {
            for &d2 in transpose.neighbors(d1) {
                if d2 == v {
                    continue;
                }
                if let Some(stamp) = forbidden.get_mut(colors[d2]) {
                    *stamp = v;
                }
            }
        }

        let mut c = 1;
        while forbidden.get(c).is_some_and(|&stamp| stamp == v) {
            c += 1;
        }
        colors[v] = c;
        resolved += 1;
    }
    resolved
}
