//! # Partitioning
//!
//! Splits an [`AggregateMap`] into contiguous shards for independent resolution.
//!
//! ```text
//!  AggregateMap (first-seen order)
//!  ┌───────────┬───────────────┬──────────────┐
//!  │  shard 0  │    shard 1    │   shard 2    │   legacy-overlap, len=10, n=3
//!  │  [0, 3)   │    [3, 7)     │   [6, 10)    │   index 6 lands in shard 1 and 2
//!  └───────────┴───────────────┴──────────────┘
//! ```
//!
//! The legacy policy reproduces the historical slicing where every shard
//! after the first reaches one entry into its neighbour. The ordered merge in
//! the driver lets the later shard win for that duplicated entry.

use crate::aggregate::AggregateMap;
use crate::error::{AttributionError, Result};
use crate::model::{AggregateEntry, FeatureId};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, instrument};

/// How shard boundaries are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionPolicy {
    /// Shards after the first extend one entry past their nominal end
    #[default]
    LegacyOverlap,
    /// Disjoint shards
    Clean,
}

/// A contiguous view of the aggregate assigned to one worker.
#[derive(Debug, Clone, Copy)]
pub struct Shard<'a> {
    /// Position of this shard in the partition sequence
    pub index: usize,
    range: (usize, usize),
    entries: &'a [(FeatureId, AggregateEntry)],
}

impl<'a> Shard<'a> {
    /// Build a shard over an explicit slice of aggregate entries.
    pub fn new(index: usize, entries: &'a [(FeatureId, AggregateEntry)]) -> Self {
        Self {
            index,
            range: (0, entries.len()),
            entries,
        }
    }

    /// Entry positions this shard covers within the aggregate
    pub fn range(&self) -> Range<usize> {
        self.range.0..self.range.1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &'a [(FeatureId, AggregateEntry)] {
        self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &'a AggregateEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}

/// Compute the entry ranges for `len` entries split into `shard_count` shards.
pub fn shard_ranges(
    len: usize,
    shard_count: usize,
    policy: PartitionPolicy,
) -> Result<Vec<Range<usize>>> {
    if shard_count < 1 {
        return Err(AttributionError::InvalidPartition { shard_count });
    }

    let step = len / shard_count;
    let last = shard_count - 1;
    let ranges = (0..shard_count)
        .map(|i| {
            let start = (i * step).min(len);
            let nominal_end = match policy {
                PartitionPolicy::LegacyOverlap if i > 0 => (i + 1) * step + 1,
                _ => (i + 1) * step,
            };
            let end = if i == last { len } else { nominal_end.min(len) };
            start..end
        })
        .collect();
    Ok(ranges)
}

/// Split the aggregate into `shard_count` contiguous shards.
#[instrument(skip(map), fields(features = map.len()), level = "debug")]
pub fn partition(
    map: &AggregateMap,
    shard_count: usize,
    policy: PartitionPolicy,
) -> Result<Vec<Shard<'_>>> {
    let entries = map.entries();
    let shards: Vec<Shard<'_>> = shard_ranges(entries.len(), shard_count, policy)?
        .into_iter()
        .enumerate()
        .map(|(index, range)| Shard {
            index,
            range: (range.start, range.end),
            entries: &entries[range],
        })
        .collect();

    for shard in &shards {
        debug!(shard = shard.index, start = shard.range.0, end = shard.range.1, "shard range");
    }
    Ok(shards)
}
