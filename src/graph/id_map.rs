//! Id mapping boundary and batch partitioning.
//!
//! The engine works on a dense mapped id space `[0, node_count)`. How the
//! external graph's ids translate into that space is a collaborator
//! concern, modeled by [`IdMapping`]; [`DirectIdMap`] is the trivial
//! identity mapping used when the source already hands out dense ids.

use crate::error::{GraphError, Result};
use crate::model::{narrow_id, NodeId, OriginalId};

/// Translation between the external id space and the dense mapped space.
///
/// Implementations are shared read-only across parallel import batches.
pub trait IdMapping: Sync {
    /// Number of mapped nodes; fixes the capacity of every matrix built
    /// over this mapping.
    fn node_count(&self) -> usize;

    /// Maps an original id into the dense space, or `None` if the node
    /// was not loaded.
    fn to_mapped(&self, original: OriginalId) -> Option<NodeId>;

    /// Translates a mapped id back into the original space.
    fn to_original(&self, mapped: NodeId) -> OriginalId;

    /// Whether the original id is part of the mapped space.
    fn contains(&self, original: OriginalId) -> bool {
        self.to_mapped(original).is_some()
    }
}

/// Identity mapping over an already dense id space.
#[derive(Debug, Clone, Copy)]
pub struct DirectIdMap {
    node_count: usize,
}

impl DirectIdMap {
    /// Creates an identity mapping for `node_count` nodes.
    ///
    /// Fails if the count does not fit the 32-bit mapped space.
    pub fn new(node_count: usize) -> Result<Self> {
        narrow_id(node_count as u64)?;
        Ok(Self { node_count })
    }
}

impl IdMapping for DirectIdMap {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn to_mapped(&self, original: OriginalId) -> Option<NodeId> {
        if original < self.node_count as u64 {
            Some(original as NodeId)
        } else {
            None
        }
    }

    fn to_original(&self, mapped: NodeId) -> OriginalId {
        u64::from(mapped)
    }
}

/// A contiguous, disjoint slice of the mapped id space owned by one
/// import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdBatch {
    /// First mapped id of the slice.
    pub start: NodeId,
    /// Number of ids in the slice.
    pub length: usize,
}

impl IdBatch {
    /// Iterates the mapped ids of this batch.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        let start = self.start;
        (0..self.length as u32).map(move |offset| start + offset)
    }
}

/// Splits `[0, node_count)` into consecutive batches of at most
/// `batch_size` ids.
pub fn partition(node_count: usize, batch_size: usize) -> Result<Vec<IdBatch>> {
    if batch_size == 0 {
        return Err(GraphError::InvalidArgument(
            "batch size must be positive".into(),
        ));
    }
    narrow_id(node_count as u64)?;
    let mut batches = Vec::with_capacity(node_count.div_ceil(batch_size));
    let mut start = 0usize;
    while start < node_count {
        let length = batch_size.min(node_count - start);
        batches.push(IdBatch {
            start: start as NodeId,
            length,
        });
        start += length;
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_map_is_the_identity_inside_bounds() {
        let map = DirectIdMap::new(10).unwrap();
        assert_eq!(map.to_mapped(3), Some(3));
        assert_eq!(map.to_mapped(10), None);
        assert_eq!(map.to_original(7), 7);
        assert!(map.contains(9));
        assert!(!map.contains(10));
    }

    #[test]
    fn partition_covers_the_id_space_disjointly() {
        let batches = partition(10, 4).unwrap();
        assert_eq!(
            batches,
            vec![
                IdBatch { start: 0, length: 4 },
                IdBatch { start: 4, length: 4 },
                IdBatch { start: 8, length: 2 },
            ]
        );
        let all: Vec<NodeId> = batches.iter().flat_map(|b| b.nodes()).collect();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn partition_rejects_zero_batches() {
        assert!(partition(10, 0).is_err());
        assert!(partition(0, 4).unwrap().is_empty());
    }
}
