//! Loader and visitor strategy selection.
//!
//! The combination space of {outgoing, incoming, undirected, weighted} is
//! fixed once per import configuration, so both layers are small closed
//! enums dispatched by pattern matching instead of trait objects.

use crate::graph::config::LoadConfig;
use crate::model::Direction;

/// How one batch walks the source and which rows it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadStrategy {
    /// Scan outgoing records, write outgoing rows.
    Outgoing,
    /// Scan incoming records, write incoming rows.
    Incoming,
    /// Scan both directions in one cursor pass, write both row sets.
    Both,
    /// Scan both directions, write each relationship into the owning
    /// node's outgoing row; the matrix carries no incoming store.
    Undirected,
    /// Scan nothing; exists so progress accounting still runs when no
    /// direction was requested.
    Skip,
}

impl LoadStrategy {
    pub(crate) fn from_config(config: &LoadConfig) -> Self {
        if config.load_as_undirected {
            return LoadStrategy::Undirected;
        }
        match (config.load_outgoing, config.load_incoming) {
            (true, true) => LoadStrategy::Both,
            (true, false) => LoadStrategy::Outgoing,
            (false, true) => LoadStrategy::Incoming,
            (false, false) => LoadStrategy::Skip,
        }
    }

    /// Which direction(s) the batch-local matrix must hold.
    pub(crate) fn matrix_direction(&self) -> Direction {
        match self {
            LoadStrategy::Incoming => Direction::Incoming,
            LoadStrategy::Both => Direction::Both,
            LoadStrategy::Outgoing | LoadStrategy::Undirected | LoadStrategy::Skip => {
                Direction::Outgoing
            }
        }
    }

    /// Cursor direction for the per-node scan; `None` skips scanning.
    pub(crate) fn scan_direction(&self) -> Option<Direction> {
        match self {
            LoadStrategy::Outgoing => Some(Direction::Outgoing),
            LoadStrategy::Incoming => Some(Direction::Incoming),
            LoadStrategy::Both | LoadStrategy::Undirected => Some(Direction::Both),
            LoadStrategy::Skip => None,
        }
    }
}

/// Which row a single record lands in, relative to the visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visit {
    /// Append the neighbor to the node's outgoing row.
    Outgoing,
    /// Append the neighbor to the node's incoming row.
    Incoming,
}
