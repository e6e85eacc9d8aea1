//! Adjacency storage and the read-facing graph capability.

pub mod config;
pub mod heavy;
pub mod id_map;
pub(crate) mod intersections;
pub mod matrix;
pub(crate) mod search;
pub mod weights;

pub use config::LoadConfig;
pub use heavy::HeavyGraph;
pub use id_map::{partition, DirectIdMap, IdBatch, IdMapping};
pub use matrix::{AdjacencyMatrix, SortPhase};
pub use weights::WeightMap;
