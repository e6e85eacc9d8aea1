//! In-memory adjacency-matrix storage for graph analytics.
//!
//! The engine materializes a graph from an external relationship source
//! into per-node adjacency arrays over a dense 32-bit id space, then
//! serves degree, membership, traversal and triangle-intersection queries
//! from those arrays.
//!
//! # Example
//!
//! ```rust
//! use basalt::{DirectIdMap, GraphLoader, LoadConfig, RelationshipRecord, RelationshipSource};
//! use basalt::model::Direction;
//!
//! struct Edges(Vec<(u64, u64)>);
//!
//! impl RelationshipSource for Edges {
//!     fn scan(
//!         &self,
//!         node: u64,
//!         direction: Direction,
//!         visit: &mut dyn FnMut(RelationshipRecord),
//!     ) -> bool {
//!         for &(source, target) in &self.0 {
//!             let emit = match direction {
//!                 Direction::Outgoing => source == node,
//!                 Direction::Incoming => target == node,
//!                 Direction::Both => source == node || target == node,
//!             };
//!             if emit {
//!                 visit(RelationshipRecord { source, target, weight: None });
//!             }
//!         }
//!         true
//!     }
//! }
//!
//! let edges = Edges(vec![(0, 1), (1, 2)]);
//! let id_map = DirectIdMap::new(3).unwrap();
//! let graph = GraphLoader::new(LoadConfig::outgoing(), &edges, id_map)
//!     .load()
//!     .unwrap();
//! assert_eq!(graph.degree(0, Direction::Outgoing).unwrap(), 1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod import;
pub mod logging;
pub mod model;
pub mod sort;
pub mod tracker;

pub use error::{GraphError, Result};
pub use graph::{
    AdjacencyMatrix, DirectIdMap, HeavyGraph, IdBatch, IdMapping, LoadConfig, SortPhase, WeightMap,
};
pub use import::{
    GraphLoader, ImportProgress, NoProgress, ProgressCounter, RelationshipRecord,
    RelationshipSource,
};
pub use sort::IndirectSort;
pub use tracker::AllocationTracker;
