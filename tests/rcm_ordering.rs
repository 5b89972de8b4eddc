use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::{NodeIndex, UnGraph};
use spargraph::graph::generators;
use spargraph::{find_peripheral, parallel_bfs, reverse_cuthill_mckee, CsrGraph, RcmConfig};

fn to_petgraph(g: &CsrGraph) -> UnGraph<(), ()> {
    let mut pg = UnGraph::with_capacity(g.num_rows(), g.num_edges());
    for _ in 0..g.num_rows() {
        pg.add_node(());
    }
    for u in 0..g.num_rows() {
        for &v in g.neighbors(u) {
            if u <= v {
                pg.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            }
        }
    }
    pg
}

fn assert_bijection(order: &[usize]) {
    let mut seen = vec![false; order.len()];
    for &pos in order {
        assert!(!seen[pos], "position {pos} used twice");
        seen[pos] = true;
    }
}

#[test]
fn bfs_levels_match_shortest_paths() {
    let g = generators::shuffled(&generators::grid(15, 11), 21);
    let pg = to_petgraph(&g);
    let start = find_peripheral(&g).unwrap();
    let distances = dijkstra(&pg, NodeIndex::new(start), None, |_| 1usize);

    for team in [1, 3, 8] {
        let levels = parallel_bfs(&g, start, team);
        let level_of = levels.level_of_vertex();
        for v in 0..g.num_rows() {
            assert_eq!(level_of[v], distances[&NodeIndex::new(v)], "vertex {v}, team {team}");
        }
    }
}

#[test]
fn disconnected_graph_is_fully_ordered() {
    let g = CsrGraph::from_edges(
        12,
        &[(0, 7), (7, 3), (1, 9), (9, 10), (10, 1), (4, 5), (2, 11)],
    );
    let pg = to_petgraph(&g);
    let result = reverse_cuthill_mckee(&g, &RcmConfig::default().with_team_size(4)).unwrap();

    assert_bijection(result.order());
    assert!(result.num_levels() >= connected_components(&pg));
}

#[test]
fn components_and_levels_occupy_contiguous_blocks() {
    let g = generators::disjoint_cliques(4, 5);
    let shuffled = generators::shuffled(&g, 8);
    let result = reverse_cuthill_mckee(&shuffled, &RcmConfig::default()).unwrap();
    let perm = result.permutation();
    let pg = to_petgraph(&shuffled);

    // Every clique is a single BFS tree, so each one lands in 5 consecutive slots.
    for block in perm.chunks(5) {
        for &u in block {
            for &v in block {
                assert!(u == v || pg.contains_edge(NodeIndex::new(u), NodeIndex::new(v)));
            }
        }
    }
}

#[test]
fn levels_appear_in_reverse_order() {
    let g = generators::shuffled(&generators::banded(60, 3), 4);
    let result = reverse_cuthill_mckee(&g, &RcmConfig::default().with_team_size(3)).unwrap();
    let levels = parallel_bfs(&g, result.start_vertex().unwrap(), 3);

    let mut upper = g.num_rows();
    for l in 0..levels.num_levels() {
        let positions: Vec<_> = levels.level(l).iter().map(|&v| result.order()[v]).collect();
        let lo = *positions.iter().min().unwrap();
        let hi = *positions.iter().max().unwrap();
        assert_eq!(hi + 1, upper, "level {l} is not directly below level {}", l.saturating_sub(1));
        assert_eq!(hi - lo + 1, positions.len());
        upper = lo;
    }
    assert_eq!(upper, 0);
}

#[test]
fn shuffled_band_is_recovered() {
    let band = 3;
    let g = generators::shuffled(&generators::banded(300, band), 13);
    let result = reverse_cuthill_mckee(&g, &RcmConfig::default()).unwrap();

    assert!(g.bandwidth(None) > 2 * band);
    assert!(g.bandwidth(Some(result.order())) < 2 * band);
}

#[test]
fn never_worse_than_identity_on_reference_shapes() {
    for g in [
        generators::banded(80, 2),
        generators::star(40),
        generators::disjoint_cliques(6, 3),
        generators::grid(9, 9),
    ] {
        let result = reverse_cuthill_mckee(&g, &RcmConfig::default()).unwrap();
        assert_bijection(result.order());
        assert!(g.bandwidth(Some(result.order())) <= g.bandwidth(None));
    }
}

#[test]
fn ordering_is_independent_of_team_size() {
    let g = generators::random(500, 5, 77);
    let reference = reverse_cuthill_mckee(&g, &RcmConfig::default().with_team_size(1)).unwrap();
    for team in [2, 5, 16] {
        let other = reverse_cuthill_mckee(&g, &RcmConfig::default().with_team_size(team)).unwrap();
        assert_eq!(other, reference, "team {team}");
    }
}
