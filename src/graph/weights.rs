//! Sparse weight and property storage.
//!
//! Relationship weights live outside the adjacency matrix, keyed by the
//! combined `(source << 32) | target` edge id produced by
//! [`crate::model::combine_ids`]. The same structure backs named node
//! property maps, keyed by the mapped node id.

use rustc_hash::FxHashMap;

/// Sparse `id -> f64` map with get-with-default semantics.
#[derive(Debug, Clone)]
pub struct WeightMap {
    weights: FxHashMap<u64, f64>,
    default_value: f64,
}

impl WeightMap {
    /// Creates an empty map returning `default_value` for missing ids.
    pub fn new(default_value: f64) -> Self {
        Self {
            weights: FxHashMap::default(),
            default_value,
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, default_value: f64) -> Self {
        Self {
            weights: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            default_value,
        }
    }

    /// The value reported for ids that were never stored.
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Looks up `id`, falling back to the map's default value.
    #[inline]
    pub fn get(&self, id: u64) -> f64 {
        self.get_or(id, self.default_value)
    }

    /// Looks up `id`, falling back to the given value.
    #[inline]
    pub fn get_or(&self, id: u64, fallback: f64) -> f64 {
        self.weights.get(&id).copied().unwrap_or(fallback)
    }

    /// Whether a value was stored for `id`.
    pub fn contains(&self, id: u64) -> bool {
        self.weights.contains_key(&id)
    }

    /// Stores `value` under `id`, replacing any previous value.
    #[inline]
    pub fn put(&mut self, id: u64, value: f64) {
        self.weights.insert(id, value);
    }

    /// Moves every entry of `other` into this map.
    ///
    /// Used for the sequential post-import merge of batch-local maps; the
    /// disjoint node partition guarantees the unions never collide.
    pub fn merge_from(&mut self, other: WeightMap) {
        if self.weights.is_empty() {
            self.weights = other.weights;
        } else {
            self.weights.extend(other.weights);
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
