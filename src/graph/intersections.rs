//! Two-pointer intersection of ascending adjacency rows.

use crate::model::NodeId;

/// Writes the common elements of two ascending slices into `out`.
///
/// `out` is cleared first so a single buffer can be reused across calls.
/// Both inputs must already be sorted.
pub(crate) fn intersect_sorted(a: &[NodeId], b: &[NodeId], out: &mut Vec<NodeId>) {
    out.clear();
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
}
