use basalt::model::Direction;
use basalt::{AdjacencyMatrix, AllocationTracker, SortPhase};

fn matrix(node_count: usize, direction: Direction) -> AdjacencyMatrix {
    AdjacencyMatrix::new(node_count, direction, AllocationTracker::empty())
}

fn outgoing_row(m: &AdjacencyMatrix, node: u64) -> Vec<u32> {
    let mut row = Vec::new();
    m.for_each(node, Direction::Outgoing, |_, target| row.push(target))
        .unwrap();
    row
}

#[test]
fn insertion_order_is_preserved_until_sorted() {
    let mut m = matrix(8, Direction::Outgoing);
    for target in [5, 2, 7, 2, 0] {
        m.add_outgoing(1, target).unwrap();
    }
    assert_eq!(m.phase(), SortPhase::Unsorted);
    assert_eq!(outgoing_row(&m, 1), vec![5, 2, 7, 2, 0]);
    assert_eq!(m.degree(1, Direction::Outgoing).unwrap(), 5);

    m.sort_all(None).unwrap();
    assert_eq!(m.phase(), SortPhase::Sorted);
    assert_eq!(outgoing_row(&m, 1), vec![0, 2, 2, 5, 7]);
}

#[test]
fn sorting_is_idempotent() {
    let mut m = matrix(4, Direction::Outgoing);
    for target in [3, 1, 2] {
        m.add_outgoing(0, target).unwrap();
    }
    m.sort_all(None).unwrap();
    let first = outgoing_row(&m, 0);
    m.sort_all(None).unwrap();
    assert_eq!(outgoing_row(&m, 0), first);
}

#[test]
fn membership_agrees_across_row_sizes() {
    // One short row (linear scan) and one row long enough for the
    // binary-search path once sorted.
    let mut m = matrix(200, Direction::Outgoing);
    m.add_outgoing(0, 7).unwrap();
    for target in (0..150).rev() {
        m.add_outgoing(1, target).unwrap();
    }
    m.sort_all(None).unwrap();

    assert!(m.has_outgoing(0, 7).unwrap());
    assert!(!m.has_outgoing(0, 8).unwrap());
    for target in 0..150 {
        assert!(m.has_outgoing(1, target).unwrap(), "missing {target}");
    }
    assert!(!m.has_outgoing(1, 150).unwrap());
    assert!(!m.has_outgoing(1, 199).unwrap());
}

#[test]
fn target_spans_outgoing_then_incoming_for_both() {
    let mut m = matrix(8, Direction::Both);
    m.add_outgoing(0, 1).unwrap();
    m.add_outgoing(0, 2).unwrap();
    m.add_incoming(5, 0).unwrap();

    assert_eq!(m.target(0, 0, Direction::Both).unwrap(), Some(1));
    assert_eq!(m.target(0, 1, Direction::Both).unwrap(), Some(2));
    assert_eq!(m.target(0, 2, Direction::Both).unwrap(), Some(5));
    assert_eq!(m.target(0, 3, Direction::Both).unwrap(), None);
    assert_eq!(m.target(0, 0, Direction::Incoming).unwrap(), Some(5));
    assert_eq!(m.target(0, 1, Direction::Incoming).unwrap(), None);
}

#[test]
fn row_growth_keeps_the_valid_prefix() {
    let mut m = matrix(2, Direction::Outgoing);
    assert_eq!(m.degree(0, Direction::Outgoing).unwrap(), 0);
    // Push through several capacity doublings.
    let targets: Vec<u64> = (0..2).chain(0..2).chain(0..65).collect();
    for &target in &targets {
        m.add_outgoing(0, target).unwrap();
    }
    assert_eq!(m.degree(0, Direction::Outgoing).unwrap(), targets.len());
    let row = outgoing_row(&m, 0);
    let expected: Vec<u32> = targets.iter().map(|&t| t as u32).collect();
    assert_eq!(row, expected);
}

#[test]
fn armed_rows_never_regrow() {
    let tracker = AllocationTracker::new();
    let mut m = AdjacencyMatrix::new(4, Direction::Outgoing, tracker.clone());
    m.arm_out(2, 6).unwrap();
    let armed = tracker.tracked();
    for target in 0..6 {
        m.add_outgoing(2, target).unwrap();
    }
    assert_eq!(tracker.tracked(), armed);
    assert_eq!(m.degree(2, Direction::Outgoing).unwrap(), 6);
}

#[test]
fn split_and_merge_matches_a_single_matrix() {
    let edges: &[(u64, u64)] = &[(0, 3), (1, 2), (2, 0), (3, 1), (3, 3), (4, 2)];

    let mut whole = matrix(5, Direction::Outgoing);
    for &(source, target) in edges {
        whole.add_outgoing(source, target).unwrap();
    }

    // Same edges written into two batch-local matrices over [0, 3) and
    // [3, 5), rows local, targets global.
    let mut low = matrix(3, Direction::Outgoing);
    let mut high = matrix(2, Direction::Outgoing);
    for &(source, target) in edges {
        if source < 3 {
            low.add_outgoing(source, target).unwrap();
        } else {
            high.add_outgoing(source - 3, target).unwrap();
        }
    }
    let mut merged = matrix(5, Direction::Outgoing);
    merged.add_matrix(low, 0, 3).unwrap();
    merged.add_matrix(high, 3, 2).unwrap();

    for node in 0..5 {
        assert_eq!(outgoing_row(&merged, node), outgoing_row(&whole, node));
    }
}

#[test]
fn intersect_emits_each_triangle_once() {
    // Triangle 0-1-2 plus a dangling edge 0-3, undirected rows.
    let mut m = matrix(4, Direction::Outgoing);
    for &(a, b) in &[(0, 1), (0, 2), (0, 3), (1, 2)] {
        m.add_outgoing(a, b).unwrap();
        m.add_outgoing(b, a).unwrap();
    }
    m.sort_all(None).unwrap();

    let mut triangles = Vec::new();
    m.intersect_all(0, |a, b, c| triangles.push((a, b, c))).unwrap();
    assert_eq!(triangles, vec![(0, 1, 2)]);

    let mut from_one = Vec::new();
    m.intersect_all(1, |a, b, c| from_one.push((a, b, c))).unwrap();
    assert_eq!(from_one, vec![(1, 0, 2)]);

    // The dangling edge closes no triangle.
    let mut from_three = Vec::new();
    m.intersect_all(3, |a, b, c| from_three.push((a, b, c)))
        .unwrap();
    assert!(from_three.is_empty());
}
