//! Per-key running statistics and the reduction that folds per-chunk tables
//! into the global result.

use ahash::RandomState;
use std::collections::{BTreeMap, HashMap};

/// Running statistics for one key. `mean` is recomputed after every update
/// so the record is always internally consistent (`min <= mean <= max`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregate {
    pub sum: f64,
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Aggregate {
    /// Seed a record from the first observation of a key.
    pub fn seed(value: f64) -> Self {
        Self { sum: value, count: 1, min: value, max: value, mean: value }
    }

    /// Fold one more observation into the record.
    pub fn observe(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.mean = self.sum / self.count as f64;
    }

    /// Combine two records for the same key. Sums the full underlying
    /// counts of both sides, so a chunk with many observations weighs into
    /// the global mean by all of them.
    pub fn combine(&mut self, other: &Aggregate) {
        self.sum += other.sum;
        self.count += other.count;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
        self.mean = self.sum / self.count as f64;
    }
}

/// Private table produced by one chunk scan. ahash keeps the hot path cheap;
/// ordering does not matter until the merge.
pub type ChunkTable = HashMap<String, Aggregate, RandomState>;

/// Global key -> statistics table. BTreeMap so iteration (and the report)
/// comes out in lexicographic key order.
pub type StatsTable = BTreeMap<String, Aggregate>;

/// Reduce per-chunk tables into one global table. The fold is associative
/// and commutative per key; tables arrive in ascending chunk index, which
/// keeps floating-point summation order reproducible for a given chunk
/// count.
pub fn merge_tables<I>(parts: I) -> StatsTable
where
    I: IntoIterator<Item = ChunkTable>,
{
    let mut total = StatsTable::new();
    for part in parts {
        for (key, rec) in part {
            match total.entry(key) {
                std::collections::btree_map::Entry::Vacant(e) => {
                    e.insert(rec);
                }
                std::collections::btree_map::Entry::Occupied(mut e) => {
                    e.get_mut().combine(&rec);
                }
            }
        }
    }
    total
}
