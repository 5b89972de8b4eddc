//! Tests for the CSR adjacency.

use super::*;

#[test]
fn test_from_adjacency_basic() {
    // 0 -> 1, 2
    // 1 -> 2
    // 2 ->
    let g = CsrGraph::from_adjacency(&[vec![1, 2], vec![2], vec![]]);
    assert_eq!(g.num_rows(), 3);
    assert_eq!(g.num_cols(), 3);
    assert_eq!(g.num_edges(), 3);
    assert_eq!(g.offsets(), &[0, 2, 3, 3]);
    assert_eq!(g.neighbors(0), &[1, 2]);
    assert_eq!(g.degree(2), 0);
    assert_eq!(g.max_degree(), 2);
}

#[test]
fn test_from_edges_is_symmetric_and_deduplicated() {
    let g = CsrGraph::from_edges(4, &[(0, 1), (1, 0), (1, 2), (3, 3)]);
    assert_eq!(g.neighbors(0), &[1]);
    assert_eq!(g.neighbors(1), &[0, 2]);
    assert_eq!(g.neighbors(3), &[3]);
    assert!(g.is_symmetric());
}

#[test]
fn test_from_csr_parts_rejects_malformed() {
    assert!(matches!(
        CsrGraph::from_csr_parts(3, vec![], vec![]),
        Err(Error::MalformedCsr { .. })
    ));
    assert!(matches!(
        CsrGraph::from_csr_parts(3, vec![1, 1], vec![0]),
        Err(Error::MalformedCsr { .. })
    ));
    assert!(matches!(
        CsrGraph::from_csr_parts(3, vec![0, 2, 1], vec![0, 1]),
        Err(Error::MalformedCsr { .. })
    ));
    assert!(matches!(
        CsrGraph::from_csr_parts(3, vec![0, 1, 3], vec![0, 1]),
        Err(Error::MalformedCsr { .. })
    ));
    assert!(matches!(
        CsrGraph::from_csr_parts(2, vec![0, 1], vec![2]),
        Err(Error::MalformedCsr { .. })
    ));
}

#[test]
fn test_from_csr_parts_rectangular() {
    // 2 rows x 3 cols
    let g = CsrGraph::from_csr_parts(3, vec![0, 2, 3], vec![0, 2, 1]).unwrap();
    assert_eq!(g.num_rows(), 2);
    assert_eq!(g.num_cols(), 3);

    let t = g.transpose();
    assert_eq!(t.num_rows(), 3);
    assert_eq!(t.num_cols(), 2);
    assert_eq!(t.neighbors(0), &[0]);
    assert_eq!(t.neighbors(1), &[1]);
    assert_eq!(t.neighbors(2), &[0]);
    assert!(t.is_transpose_of(&g));
    assert!(g.is_transpose_of(&t));
    assert!(!g.is_symmetric());
}

#[test]
fn test_transpose_twice_round_trips_sorted_rows() {
    let g = CsrGraph::from_adjacency(&[vec![2, 1], vec![0], vec![1, 0]]);
    let tt = g.transpose().transpose();
    assert_eq!(tt.neighbors(0), &[1, 2]);
    assert_eq!(tt.neighbors(2), &[0, 1]);
    assert!(tt.is_transpose_of(&g.transpose()));
}

#[test]
fn test_empty_graph() {
    let g = CsrGraph::from_adjacency(&[]);
    assert_eq!(g.num_rows(), 0);
    assert_eq!(g.num_edges(), 0);
    assert_eq!(g.max_degree(), 0);
    assert_eq!(g.bandwidth(None), 0);
    assert_eq!(g.transpose().num_rows(), 0);
}

#[test]
fn test_bandwidth_identity_and_permuted() {
    // path 0-3-1-2 stored with scattered labels
    let g = CsrGraph::from_edges(4, &[(0, 3), (3, 1), (1, 2)]);
    assert_eq!(g.bandwidth(None), 3);
    // relabel so the path is 0-1-2-3
    let order = [0, 2, 3, 1];
    assert_eq!(g.bandwidth(Some(&order)), 1);
}
