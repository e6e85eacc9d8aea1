//! Boundary traits towards the transactional source and progress sinks.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{Direction, OriginalId};

/// One relationship record as handed out by the external source.
///
/// Ids are in the source's original space; the importer translates them
/// through the id mapping before anything is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationshipRecord {
    /// Original id of the source endpoint.
    pub source: OriginalId,
    /// Original id of the target endpoint.
    pub target: OriginalId,
    /// Stored weight, if the relationship carries one.
    pub weight: Option<f64>,
}

/// Cursor access to the external transactional source.
///
/// Implementations must tolerate many concurrent `scan` calls with no
/// shared mutable state; every import batch drives its own scans.
pub trait RelationshipSource: Sync {
    /// Positions a cursor on `node` and yields its relationship records
    /// for `direction`.
    ///
    /// Returns `false` when the node is unknown to the source, in which
    /// case `visit` must not have been called.
    fn scan(
        &self,
        node: OriginalId,
        direction: Direction,
        visit: &mut dyn FnMut(RelationshipRecord),
    ) -> bool;
}

/// Observational sink for imported-relationship counts.
///
/// Purely informational; implementations must not apply back-pressure.
pub trait ImportProgress: Sync {
    /// Reports `count` newly imported relationships.
    fn relationships_imported(&self, count: u64);
}

/// Progress sink that discards all reports.
pub struct NoProgress;

impl ImportProgress for NoProgress {
    fn relationships_imported(&self, _count: u64) {}
}

/// Progress sink that accumulates a shared total.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    imported: AtomicU64,
}

impl ProgressCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total relationships reported so far.
    pub fn total(&self) -> u64 {
        self.imported.load(Ordering::Relaxed)
    }
}

impl ImportProgress for ProgressCounter {
    fn relationships_imported(&self, count: u64) {
        self.imported.fetch_add(count, Ordering::Relaxed);
    }
}
