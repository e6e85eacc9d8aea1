//! Error handling for basalt operations.
//!
//! All public APIs return `Result<T, GraphError>`. The engine draws a hard
//! line between *absence* and *failure*: a missing edge or an out-of-range
//! ordinal index is an ordinary result (`false` / `None`), while a node id
//! that does not fit the matrix is a fatal error surfaced immediately.

use thiserror::Error;

/// Result type for basalt operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while building or querying a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node id exceeds the fixed construction-time capacity of the
    /// adjacency matrix.
    ///
    /// The id space is dense and fixed when the matrix is created, so this
    /// indicates a defect in the upstream id mapping rather than a
    /// recoverable condition.
    #[error("node id {id} exceeds matrix capacity {capacity}")]
    CapacityExceeded {
        /// The offending id.
        id: u64,
        /// The matrix capacity it was checked against.
        capacity: usize,
    },

    /// A wide id was used where a 32-bit slot is required.
    ///
    /// Narrowing conversions are checked explicitly; truncating an id would
    /// silently corrupt the graph.
    #[error("id {0} does not fit into a 32-bit node id")]
    IdOverflow(u64),

    /// The requested direction was not loaded into the matrix.
    #[error("direction {0:?} was not loaded")]
    DirectionNotLoaded(crate::model::Direction),

    /// Invalid configuration or argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The graph was released and its storage dropped.
    #[error("graph has been released")]
    Released,
}
