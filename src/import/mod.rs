//! Parallel bulk import from an external relationship source.
//!
//! The pipeline is: partition the mapped id space into batches, scan each
//! batch in parallel into a batch-local matrix, then merge the batch
//! matrices and weight maps sequentially into one [`HeavyGraph`].
//!
//! [`HeavyGraph`]: crate::graph::HeavyGraph

pub mod importer;
pub mod loader;
pub mod source;
pub(crate) mod visitor;

pub use importer::{RelationshipImporter, Relationships};
pub use loader::GraphLoader;
pub use source::{ImportProgress, NoProgress, ProgressCounter, RelationshipRecord, RelationshipSource};
