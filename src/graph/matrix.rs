//! Array-backed adjacency storage.
//!
//! The matrix owns one growable row of neighbor ids per node and per
//! configured direction. Node capacity is fixed at construction and ids
//! must stay below it; row capacity grows by oversizing and is never
//! returned. A row's length is the node's degree; slots past it do not
//! exist as far as any reader is concerned.
//!
//! Population happens through `arm_*` / `add_*` during the import phase,
//! optionally followed by a sort pass; afterwards the matrix is treated
//! as logically immutable by its readers.

use rayon::prelude::*;

use crate::error::{GraphError, Result};
use crate::graph::intersections::intersect_sorted;
use crate::graph::search::{binary_search, linear_search, LINEAR_SEARCH_LIMIT};
use crate::graph::weights::WeightMap;
use crate::model::{combine_ids, narrow_id, Direction, NodeId};
use crate::tracker::AllocationTracker;

/// Matrix-wide search phase.
///
/// The phase only moves forward: [`AdjacencyMatrix::sort_all`] is the one
/// transition into `Sorted`, and binary-search membership is never
/// selected before it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPhase {
    /// Rows hold targets in insertion order.
    Unsorted,
    /// Every row's prefix is ascending.
    Sorted,
}

const NODE_ID_BYTES: u64 = std::mem::size_of::<NodeId>() as u64;
const ROW_HANDLE_BYTES: u64 = std::mem::size_of::<Vec<NodeId>>() as u64;
const MIN_ROW_CAPACITY: usize = 4;

/// Appends one target, growing the row by doubling rather than exact fit.
fn push_target(row: &mut Vec<NodeId>, target: NodeId, tracker: &AllocationTracker) {
    if row.len() == row.capacity() {
        let old_capacity = row.capacity();
        let new_capacity = (old_capacity * 2).max(MIN_ROW_CAPACITY);
        row.reserve_exact(new_capacity - old_capacity);
        tracker.add((row.capacity() - old_capacity) as u64 * NODE_ID_BYTES);
    }
    row.push(target);
}

/// Mutable per-node adjacency for one or both directions.
pub struct AdjacencyMatrix {
    outgoing: Option<Vec<Vec<NodeId>>>,
    incoming: Option<Vec<Vec<NodeId>>>,
    node_count: usize,
    phase: SortPhase,
    tracker: AllocationTracker,
}

impl AdjacencyMatrix {
    /// Creates a matrix for `node_count` nodes holding the given
    /// direction(s).
    pub fn new(node_count: usize, direction: Direction, tracker: AllocationTracker) -> Self {
        let make_rows = || {
            tracker.add(node_count as u64 * ROW_HANDLE_BYTES);
            vec![Vec::new(); node_count]
        };
        let (outgoing, incoming) = match direction {
            Direction::Outgoing => (Some(make_rows()), None),
            Direction::Incoming => (None, Some(make_rows())),
            Direction::Both => (Some(make_rows()), Some(make_rows())),
        };
        Self {
            outgoing,
            incoming,
            node_count,
            phase: SortPhase::Unsorted,
            tracker,
        }
    }

    /// Fixed node capacity of this matrix.
    pub fn capacity(&self) -> usize {
        self.node_count
    }

    /// Which direction(s) this matrix holds.
    pub fn load_direction(&self) -> Direction {
        match (&self.outgoing, &self.incoming) {
            (Some(_), Some(_)) => Direction::Both,
            (None, Some(_)) => Direction::Incoming,
            _ => Direction::Outgoing,
        }
    }

    /// Current search phase.
    pub fn phase(&self) -> SortPhase {
        self.phase
    }

    fn check_node(&self, id: u64) -> Result<usize> {
        if id < self.node_count as u64 {
            Ok(id as usize)
        } else {
            Err(GraphError::CapacityExceeded {
                id,
                capacity: self.node_count,
            })
        }
    }

    fn rows(&self, direction: Direction) -> Result<&[Vec<NodeId>]> {
        let rows = match direction {
            Direction::Outgoing => self.outgoing.as_deref(),
            Direction::Incoming => self.incoming.as_deref(),
            Direction::Both => None,
        };
        rows.ok_or(GraphError::DirectionNotLoaded(direction))
    }

    fn rows_mut(&mut self, direction: Direction) -> Result<&mut Vec<Vec<NodeId>>> {
        let rows = match direction {
            Direction::Outgoing => self.outgoing.as_mut(),
            Direction::Incoming => self.incoming.as_mut(),
            Direction::Both => None,
        };
        rows.ok_or(GraphError::DirectionNotLoaded(direction))
    }

    fn arm(&mut self, direction: Direction, node: u64, degree: usize) -> Result<()> {
        if degree == 0 {
            return Ok(());
        }
        let row = self.check_node(node)?;
        self.tracker.add(degree as u64 * NODE_ID_BYTES);
        self.rows_mut(direction)?[row] = Vec::with_capacity(degree);
        Ok(())
    }

    /// Preallocates the outgoing row of `node` for a known final degree.
    ///
    /// No-op for a zero degree. Replaces whatever the row held, so call it
    /// before the first write for that node.
    pub fn arm_out(&mut self, node: u64, degree: usize) -> Result<()> {
        self.arm(Direction::Outgoing, node, degree)
    }

    /// Preallocates the incoming row of `node` for a known final degree.
    pub fn arm_in(&mut self, node: u64, degree: usize) -> Result<()> {
        self.arm(Direction::Incoming, node, degree)
    }

    /// Appends `target` to the outgoing row of `source`. Amortized O(1);
    /// duplicates are stored as-is.
    pub fn add_outgoing(&mut self, source: u64, target: u64) -> Result<()> {
        let row = self.check_node(source)?;
        let target = narrow_id(target)?;
        let tracker = self.tracker.clone();
        push_target(&mut self.rows_mut(Direction::Outgoing)?[row], target, &tracker);
        Ok(())
    }

    /// Appends `source` to the incoming row of `target`.
    pub fn add_incoming(&mut self, source: u64, target: u64) -> Result<()> {
        let row = self.check_node(target)?;
        let source = narrow_id(source)?;
        let tracker = self.tracker.clone();
        push_target(&mut self.rows_mut(Direction::Incoming)?[row], source, &tracker);
        Ok(())
    }

    fn has(&self, direction: Direction, node: u64, key: u64) -> Result<bool> {
        let row = self.check_node(node)?;
        let key = narrow_id(key)?;
        let targets = &self.rows(direction)?[row];
        if self.phase == SortPhase::Sorted && targets.len() > LINEAR_SEARCH_LIMIT {
            Ok(binary_search(targets, key))
        } else {
            Ok(linear_search(targets, key))
        }
    }

    /// Whether `target` appears in the outgoing row of `source`.
    pub fn has_outgoing(&self, source: u64, target: u64) -> Result<bool> {
        self.has(Direction::Outgoing, source, target)
    }

    /// Whether `target` appears in the incoming row of `source`.
    pub fn has_incoming(&self, source: u64, target: u64) -> Result<bool> {
        self.has(Direction::Incoming, source, target)
    }

    /// Degree of `node` for the given direction; `Both` sums both rows.
    pub fn degree(&self, node: u64, direction: Direction) -> Result<usize> {
        let row = self.check_node(node)?;
        match direction {
            Direction::Outgoing => Ok(self.rows(Direction::Outgoing)?[row].len()),
            Direction::Incoming => Ok(self.rows(Direction::Incoming)?[row].len()),
            Direction::Both => Ok(self.rows(Direction::Outgoing)?[row].len()
                + self.rows(Direction::Incoming)?[row].len()),
        }
    }

    /// Visits every neighbor in the valid prefix of `node`.
    ///
    /// For `Both`, incoming neighbors are visited before outgoing ones.
    pub fn for_each<F>(&self, node: u64, direction: Direction, mut consumer: F) -> Result<()>
    where
        F: FnMut(NodeId, NodeId),
    {
        let row = self.check_node(node)?;
        let node = row as NodeId;
        match direction {
            Direction::Outgoing | Direction::Incoming => {
                for &neighbor in &self.rows(direction)?[row] {
                    consumer(node, neighbor);
                }
            }
            Direction::Both => {
                for &neighbor in &self.rows(Direction::Incoming)?[row] {
                    consumer(node, neighbor);
                }
                for &neighbor in &self.rows(Direction::Outgoing)?[row] {
                    consumer(node, neighbor);
                }
            }
        }
        Ok(())
    }

    /// Visits every neighbor of `node` with the weight resolved from
    /// `weights` via the combined edge id.
    ///
    /// For `Both`, outgoing neighbors are visited before incoming ones.
    pub fn for_each_weighted<F>(
        &self,
        node: u64,
        direction: Direction,
        weights: &WeightMap,
        mut consumer: F,
    ) -> Result<()>
    where
        F: FnMut(NodeId, NodeId, f64),
    {
        let row = self.check_node(node)?;
        let node = row as NodeId;
        let mut outgoing = |consumer: &mut F| -> Result<()> {
            for &target in &self.rows(Direction::Outgoing)?[row] {
                consumer(node, target, weights.get(combine_ids(node, target)));
            }
            Ok(())
        };
        let mut incoming = |consumer: &mut F| -> Result<()> {
            for &source in &self.rows(Direction::Incoming)?[row] {
                consumer(node, source, weights.get(combine_ids(source, node)));
            }
            Ok(())
        };
        match direction {
            Direction::Outgoing => outgoing(&mut consumer),
            Direction::Incoming => incoming(&mut consumer),
            Direction::Both => {
                outgoing(&mut consumer)?;
                incoming(&mut consumer)
            }
        }
    }

    /// Ordinal access into the valid prefix of `node`.
    ///
    /// `Both` indexes the outgoing row first, then the incoming row offset
    /// by the outgoing degree. Out-of-range indices are an ordinary
    /// `None`, never an error.
    pub fn target(&self, node: u64, index: usize, direction: Direction) -> Result<Option<NodeId>> {
        let row = self.check_node(node)?;
        match direction {
            Direction::Outgoing | Direction::Incoming => {
                Ok(self.rows(direction)?[row].get(index).copied())
            }
            Direction::Both => {
                let outgoing = &self.rows(Direction::Outgoing)?[row];
                if index < outgoing.len() {
                    Ok(Some(outgoing[index]))
                } else {
                    Ok(self.rows(Direction::Incoming)?[row]
                        .get(index - outgoing.len())
                        .copied())
                }
            }
        }
    }

    /// Sorts the outgoing row of one node ascending, in place.
    pub fn sort_outgoing(&mut self, node: u64) -> Result<()> {
        let row = self.check_node(node)?;
        self.rows_mut(Direction::Outgoing)?[row].sort_unstable();
        Ok(())
    }

    /// Sorts the incoming row of one node ascending, in place.
    pub fn sort_incoming(&mut self, node: u64) -> Result<()> {
        let row = self.check_node(node)?;
        self.rows_mut(Direction::Incoming)?[row].sort_unstable();
        Ok(())
    }

    /// Sorts every row of every loaded direction, node-parallel, and moves
    /// the matrix into the [`SortPhase::Sorted`] phase.
    ///
    /// Sorting is idempotent; running it twice leaves rows unchanged.
    pub fn sort_all(&mut self, concurrency: Option<usize>) -> Result<()> {
        match concurrency {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        GraphError::InvalidArgument(format!("failed to build sort pool: {e}"))
                    })?;
                pool.install(|| self.sort_all_rows());
            }
            None => self.sort_all_rows(),
        }
        self.phase = SortPhase::Sorted;
        Ok(())
    }

    fn sort_all_rows(&mut self) {
        if let Some(rows) = self.outgoing.as_mut() {
            rows.par_iter_mut().for_each(|row| row.sort_unstable());
        }
        if let Some(rows) = self.incoming.as_mut() {
            rows.par_iter_mut().for_each(|row| row.sort_unstable());
        }
    }

    /// Emits every triangle `(A, B, C)` with `B < C` that includes
    /// `node_a`, by intersecting sorted outgoing rows.
    ///
    /// Meaningful only after [`sort_all`](Self::sort_all); on unsorted
    /// rows the intersection silently misses neighbors.
    pub fn intersect_all<F>(&self, node_a: u64, mut consumer: F) -> Result<()>
    where
        F: FnMut(NodeId, NodeId, NodeId),
    {
        let a = self.check_node(node_a)?;
        let rows = self.rows(Direction::Outgoing)?;
        let neighbors_a = &rows[a];
        let mut joint = Vec::new();
        for &b in neighbors_a {
            let neighbors_b = &rows[self.check_node(u64::from(b))?];
            intersect_sorted(neighbors_a, neighbors_b, &mut joint);
            for &c in &joint {
                if b < c {
                    consumer(a as NodeId, b, c);
                }
            }
        }
        Ok(())
    }

    /// Moves `length` node rows of `other`, starting at its row 0, into
    /// this matrix at `offset`.
    ///
    /// This is the merge step for batch-local matrices built over disjoint
    /// id ranges. The destination range must never have been armed or
    /// written; the move performs no overlap detection.
    pub fn add_matrix(&mut self, other: AdjacencyMatrix, offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= self.node_count)
            .ok_or(GraphError::CapacityExceeded {
                id: (offset + length) as u64,
                capacity: self.node_count,
            })?;
        if let Some(source_rows) = other.outgoing {
            let rows = self.rows_mut(Direction::Outgoing)?;
            for (row, source) in rows[offset..end].iter_mut().zip(source_rows) {
                *row = source;
            }
        }
        if let Some(source_rows) = other.incoming {
            let rows = self.rows_mut(Direction::Incoming)?;
            for (row, source) in rows[offset..end].iter_mut().zip(source_rows) {
                *row = source;
            }
        }
        Ok(())
    }
}
