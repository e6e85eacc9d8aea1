//! Read-only graph facade.
//!
//! `HeavyGraph` composes an id mapping, one adjacency matrix and the
//! named weight/property maps into the capability handed to analytics
//! consumers. Every traversal delegates straight to the matrix; ids cross
//! the original/mapped boundary only through the mapping collaborator.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::id_map::IdMapping;
use crate::graph::matrix::{AdjacencyMatrix, SortPhase};
use crate::graph::weights::WeightMap;
use crate::model::{combine_ids, narrow_id, Direction, NodeId, OriginalId};

struct GraphState {
    matrix: AdjacencyMatrix,
    relationship_weights: WeightMap,
    node_properties: FxHashMap<String, WeightMap>,
}

/// Queryable in-memory graph over one adjacency matrix.
pub struct HeavyGraph<I> {
    id_map: I,
    state: Option<GraphState>,
    can_release: bool,
}

impl<I: IdMapping> HeavyGraph<I> {
    /// Wraps a populated matrix and its weight map into a graph.
    pub fn new(id_map: I, matrix: AdjacencyMatrix, relationship_weights: WeightMap) -> Self {
        Self {
            id_map,
            state: Some(GraphState {
                matrix,
                relationship_weights,
                node_properties: FxHashMap::default(),
            }),
            can_release: true,
        }
    }

    /// Attaches a named node property map.
    pub fn with_node_properties(mut self, name: impl Into<String>, properties: WeightMap) -> Self {
        if let Some(state) = self.state.as_mut() {
            state.node_properties.insert(name.into(), properties);
        }
        self
    }

    fn state(&self) -> Result<&GraphState> {
        self.state.as_ref().ok_or(GraphError::Released)
    }

    /// Number of nodes in the mapped id space.
    pub fn node_count(&self) -> usize {
        self.id_map.node_count()
    }

    /// Maps an original id into the dense space.
    pub fn to_mapped(&self, original: OriginalId) -> Option<NodeId> {
        self.id_map.to_mapped(original)
    }

    /// Translates a mapped id back into the original space.
    pub fn to_original(&self, mapped: NodeId) -> OriginalId {
        self.id_map.to_original(mapped)
    }

    /// Whether the original id was loaded.
    pub fn contains(&self, original: OriginalId) -> bool {
        self.id_map.contains(original)
    }

    /// Degree of `node` in the given direction.
    pub fn degree(&self, node: u64, direction: Direction) -> Result<usize> {
        self.state()?.matrix.degree(node, direction)
    }

    /// Iterates the relationships of `node`.
    pub fn for_each_relationship<F>(&self, node: u64, direction: Direction, consumer: F) -> Result<()>
    where
        F: FnMut(NodeId, NodeId),
    {
        self.state()?.matrix.for_each(node, direction, consumer)
    }

    /// Iterates the relationships of `node` with their weights.
    pub fn for_each_weighted_relationship<F>(
        &self,
        node: u64,
        direction: Direction,
        consumer: F,
    ) -> Result<()>
    where
        F: FnMut(NodeId, NodeId, f64),
    {
        let state = self.state()?;
        state
            .matrix
            .for_each_weighted(node, direction, &state.relationship_weights, consumer)
    }

    /// Whether a relationship between `source` and `target` exists.
    ///
    /// `Both` is the logical OR of the two single-direction checks.
    pub fn exists(&self, source: u64, target: u64, direction: Direction) -> Result<bool> {
        let matrix = &self.state()?.matrix;
        match direction {
            Direction::Outgoing => matrix.has_outgoing(source, target),
            Direction::Incoming => matrix.has_incoming(source, target),
            Direction::Both => Ok(matrix.has_outgoing(source, target)?
                || matrix.has_incoming(source, target)?),
        }
    }

    /// Ordinal access into the relationships of `node`; `None` past the
    /// degree.
    pub fn target(&self, node: u64, index: usize, direction: Direction) -> Result<Option<NodeId>> {
        self.state()?.matrix.target(node, index, direction)
    }

    /// Weight of the `(source, target)` relationship, or the configured
    /// default if none was stored.
    pub fn weight_of(&self, source: u64, target: u64) -> Result<f64> {
        let state = self.state()?;
        let combined = combine_ids(narrow_id(source)?, narrow_id(target)?);
        Ok(state.relationship_weights.get(combined))
    }

    /// Named node property map, if one was attached.
    pub fn node_properties(&self, name: &str) -> Result<Option<&WeightMap>> {
        Ok(self.state()?.node_properties.get(name))
    }

    /// Emits triangles around `node` via sorted-list intersection.
    pub fn intersect_all<F>(&self, node: u64, consumer: F) -> Result<()>
    where
        F: FnMut(NodeId, NodeId, NodeId),
    {
        self.state()?.matrix.intersect_all(node, consumer)
    }

    /// Search phase of the underlying matrix.
    pub fn sort_phase(&self) -> Result<SortPhase> {
        Ok(self.state()?.matrix.phase())
    }

    /// Controls whether [`release`](Self::release) may drop the storage.
    ///
    /// A matrix shared by several readers is protected by setting this to
    /// `false` on all but the owning handle.
    pub fn set_can_release(&mut self, can_release: bool) {
        self.can_release = can_release;
    }

    /// Drops the adjacency and property storage for reclamation.
    ///
    /// No-op when releasing was forbidden. Operations on a released graph
    /// return [`GraphError::Released`].
    pub fn release(&mut self) {
        if self.can_release && self.state.is_some() {
            debug!("releasing graph storage");
            self.state = None;
        }
    }

    /// Whether the storage was released.
    pub fn is_released(&self) -> bool {
        self.state.is_none()
    }
}
