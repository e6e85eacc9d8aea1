//! Membership search over adjacency prefixes.
//!
//! Small degrees are scanned linearly with a 4-way unrolled loop; sorted
//! rows above [`LINEAR_SEARCH_LIMIT`] switch to a binary search that
//! degrades into the linear scan once the window is small enough.

use crate::model::NodeId;

/// Degree above which sorted rows use binary search.
pub(crate) const LINEAR_SEARCH_LIMIT: usize = 64;

/// Unordered membership scan.
pub(crate) fn linear_search(targets: &[NodeId], key: NodeId) -> bool {
    let mut chunks = targets.chunks_exact(4);
    for chunk in &mut chunks {
        if chunk[0] == key || chunk[1] == key || chunk[2] == key || chunk[3] == key {
            return true;
        }
    }
    chunks.remainder().iter().any(|&target| target == key)
}

/// Membership search over an ascending row.
pub(crate) fn binary_search(targets: &[NodeId], key: NodeId) -> bool {
    if targets.is_empty() {
        return false;
    }
    let mut low = 0usize;
    let mut high = targets.len() - 1;
    while high - low > LINEAR_SEARCH_LIMIT {
        let mid = (low + high) >> 1;
        match targets[mid].cmp(&key) {
            std::cmp::Ordering::Less => low = mid + 1,
            std::cmp::Ordering::Greater => match mid.checked_sub(1) {
                Some(before) => high = before,
                None => return false,
            },
            std::cmp::Ordering::Equal => return true,
        }
    }
    linear_search_sorted(&targets[low..=high], key)
}

fn linear_search_sorted(targets: &[NodeId], key: NodeId) -> bool {
    for &target in targets {
        if target > key {
            return false;
        }
        if target == key {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_search_covers_unrolled_and_tail_positions() {
        let targets = [9, 4, 7, 1, 3, 8, 2];
        for &target in &targets {
            assert!(linear_search(&targets, target));
        }
        assert!(!linear_search(&targets, 5));
        assert!(!linear_search(&[], 5));
    }

    #[test]
    fn binary_search_matches_linear_on_sorted_rows() {
        let targets: Vec<NodeId> = (0..500).map(|i| i * 3).collect();
        for key in 0..1_500 {
            assert_eq!(
                binary_search(&targets, key),
                linear_search(&targets, key),
                "key {key}"
            );
        }
    }

    #[test]
    fn binary_search_handles_out_of_range_keys() {
        let targets: Vec<NodeId> = (10..200).collect();
        assert!(!binary_search(&targets, 3));
        assert!(!binary_search(&targets, 500));
    }
}
