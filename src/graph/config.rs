//! Import configuration options.
//!
//! [`LoadConfig`] fixes the shape of one bulk import before any worker
//! starts: which directions are materialized, whether weights are
//! captured, whether adjacency ends up sorted, and how the id space is
//! partitioned across parallel batches.
//!
//! # Example
//!
//! ```rust
//! use basalt::LoadConfig;
//!
//! // undirected, weighted, sorted for triangle queries
//! let mut config = LoadConfig::undirected();
//! config.with_weights = true;
//! config.sorted = true;
//! config.validate().unwrap();
//! ```

use crate::error::{GraphError, Result};

/// Configuration for one bulk import.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Materialize outgoing adjacency.
    pub load_outgoing: bool,

    /// Materialize incoming adjacency.
    pub load_incoming: bool,

    /// Treat every relationship as undirected: both endpoints see it in
    /// their outgoing row and the matrix carries no incoming store.
    /// Mutually exclusive with `load_incoming`.
    pub load_as_undirected: bool,

    /// Capture relationship weights into a [`crate::WeightMap`].
    pub with_weights: bool,

    /// Weight reported for relationships without a stored value.
    pub default_weight: f64,

    /// Sort every node's adjacency ascending after the import, enabling
    /// binary-search membership and triangle intersection.
    pub sorted: bool,

    /// Maximum number of node ids per import batch.
    pub batch_size: usize,

    /// Worker thread count for import and sorting (None = rayon default).
    pub concurrency: Option<usize>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            load_outgoing: true,
            load_incoming: false,
            load_as_undirected: false,
            with_weights: false,
            default_weight: 1.0,
            sorted: false,
            batch_size: 10_000,
            concurrency: None,
        }
    }
}

impl LoadConfig {
    /// Outgoing-only adjacency, the cheapest useful shape.
    pub fn outgoing() -> Self {
        Self::default()
    }

    /// Both directions from a single pass over the source.
    pub fn both() -> Self {
        Self {
            load_incoming: true,
            ..Self::default()
        }
    }

    /// Undirected adjacency, pre-sorted for intersection queries.
    pub fn undirected() -> Self {
        Self {
            load_as_undirected: true,
            sorted: true,
            ..Self::default()
        }
    }

    /// Rejects contradictory settings before any batch runs.
    pub fn validate(&self) -> Result<()> {
        if self.load_as_undirected && self.load_incoming {
            return Err(GraphError::InvalidArgument(
                "undirected loading materializes outgoing rows only and cannot \
                 be combined with load_incoming"
                    .into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(GraphError::InvalidArgument(
                "batch size must be positive".into(),
            ));
        }
        if let Some(0) = self.concurrency {
            return Err(GraphError::InvalidArgument(
                "concurrency must be positive when given".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        LoadConfig::outgoing().validate().unwrap();
        LoadConfig::both().validate().unwrap();
        LoadConfig::undirected().validate().unwrap();
    }

    #[test]
    fn undirected_excludes_incoming() {
        let mut config = LoadConfig::undirected();
        config.load_incoming = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        let mut config = LoadConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = LoadConfig::default();
        config.concurrency = Some(0);
        assert!(config.validate().is_err());
    }
}
