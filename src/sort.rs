//! Indirect co-sort of primitive key/value pairs.
//!
//! Sorting a node's neighbor ids must not break their alignment with a
//! parallel weight buffer. Instead of sorting one array and permuting the
//! other, each `(u32 key, f32 value)` pair is packed into a single `u64`
//! word (key in the high half, raw float bits in the low half), the packed
//! scratch is sorted by the key half, and both arrays are rebuilt from it.
//! No per-pair allocation happens on the way.

use crate::model::NodeId;

/// Reusable co-sorter for aligned `(NodeId, f32)` arrays.
///
/// The internal scratch buffer grows monotonically and is reused across
/// calls, so one instance amortizes allocation over a whole import batch.
#[derive(Debug, Default)]
pub struct IndirectSort {
    scratch: Vec<u64>,
}

#[inline]
fn pack(key: NodeId, value: f32) -> u64 {
    (u64::from(key) << 32) | u64::from(value.to_bits())
}

#[inline]
fn key_of(word: u64) -> NodeId {
    (word >> 32) as NodeId
}

#[inline]
fn value_of(word: u64) -> f32 {
    f32::from_bits(word as u32)
}

impl IndirectSort {
    /// Creates a sorter with an empty scratch buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn fill_scratch(&mut self, keys: &[NodeId], values: &[f32], length: usize) {
        if self.scratch.len() < length {
            // never shrinks
            self.scratch.resize(length, 0);
        }
        for i in 0..length {
            self.scratch[i] = pack(keys[i], values[i]);
        }
        // stable sort on the key half only: pairs with equal keys keep
        // their original order, so the earliest insertion wins ties
        self.scratch[..length].sort_by_key(|&word| word >> 32);
    }

    /// Co-sorts the first `length` entries of `keys` and `values` by key,
    /// dropping all but the first occurrence of every duplicate key.
    ///
    /// Returns the deduplicated length; entries past it are unspecified.
    pub fn sort(&mut self, keys: &mut [NodeId], values: &mut [f32], length: usize) -> usize {
        self.fill_scratch(keys, values, length);
        let mut out = 0;
        for i in 0..length {
            let key = key_of(self.scratch[i]);
            if out > 0 && keys[out - 1] == key {
                continue;
            }
            keys[out] = key;
            values[out] = value_of(self.scratch[i]);
            out += 1;
        }
        out
    }

    /// Co-sorts the first `length` entries of `keys` and `values` by key,
    /// preserving every entry.
    pub fn sort_without_deduplication(
        &mut self,
        keys: &mut [NodeId],
        values: &mut [f32],
        length: usize,
    ) {
        self.fill_scratch(keys, values, length);
        for i in 0..length {
            keys[i] = key_of(self.scratch[i]);
            values[i] = value_of(self.scratch[i]);
        }
    }
}
