//! Core id types shared across the engine.

use crate::error::{GraphError, Result};

/// Dense mapped node id in `[0, node_count)`.
pub type NodeId = u32;

/// Node id in the external source's id space.
pub type OriginalId = u64;

/// Relationship direction selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow relationships from source to target.
    Outgoing,
    /// Follow relationships from target to source.
    Incoming,
    /// Follow relationships in both directions.
    Both,
}

/// Combines a `(source, target)` pair into one 64-bit edge id.
///
/// The source occupies the high 32 bits. This is the key format used by
/// [`crate::graph::weights::WeightMap`].
#[inline]
pub fn combine_ids(source: NodeId, target: NodeId) -> u64 {
    (u64::from(source) << 32) | u64::from(target)
}

/// The source half of a combined edge id.
#[inline]
pub fn source_of(combined: u64) -> NodeId {
    (combined >> 32) as NodeId
}

/// The target half of a combined edge id.
#[inline]
pub fn target_of(combined: u64) -> NodeId {
    combined as NodeId
}

/// Checked narrowing of a wide id into the 32-bit mapped space.
#[inline]
pub(crate) fn narrow_id(id: u64) -> Result<NodeId> {
    NodeId::try_from(id).map_err(|_| GraphError::IdOverflow(id))
}
