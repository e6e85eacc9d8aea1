//! Allocation accounting for the adjacency storage.
//!
//! Tracking is a cross-cutting concern injected into the matrix rather than
//! a global singleton: [`AllocationTracker::empty`] produces a handle whose
//! operations compile down to a branch on `None`, which keeps tests and
//! callers that do not care about memory accounting free of bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Clonable handle over a shared byte counter.
///
/// Clones share the same counter, so a tracker can be handed to every
/// batch-local matrix of a parallel import and still report one total.
#[derive(Debug, Clone, Default)]
pub struct AllocationTracker {
    bytes: Option<Arc<AtomicU64>>,
}

impl AllocationTracker {
    /// A tracker that counts nothing.
    pub fn empty() -> Self {
        Self { bytes: None }
    }

    /// A tracker backed by a fresh shared counter.
    pub fn new() -> Self {
        Self {
            bytes: Some(Arc::new(AtomicU64::new(0))),
        }
    }

    /// Records `bytes` newly allocated.
    #[inline]
    pub fn add(&self, bytes: u64) {
        if let Some(counter) = &self.bytes {
            counter.fetch_add(bytes, Ordering::Relaxed);
        }
    }

    /// Records `bytes` returned to the allocator.
    #[inline]
    pub fn remove(&self, bytes: u64) {
        if let Some(counter) = &self.bytes {
            counter.fetch_sub(bytes, Ordering::Relaxed);
        }
    }

    /// Total bytes currently tracked, or zero for a no-op tracker.
    pub fn tracked(&self) -> u64 {
        self.bytes
            .as_ref()
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    /// Whether this handle actually counts.
    pub fn is_tracking(&self) -> bool {
        self.bytes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_tracker_accumulates_across_clones() {
        let tracker = AllocationTracker::new();
        let clone = tracker.clone();
        tracker.add(128);
        clone.add(64);
        clone.remove(32);
        assert_eq!(tracker.tracked(), 160);
    }

    #[test]
    fn empty_tracker_is_a_no_op() {
        let tracker = AllocationTracker::empty();
        tracker.add(1024);
        assert_eq!(tracker.tracked(), 0);
        assert!(!tracker.is_tracking());
    }
}
