//! # Overlap Aggregation
//!
//! Folds raw overlap measurements from one or more passes into a per-feature
//! aggregate. Insertion order of features is kept, since partitioning slices
//! the aggregate by position.

use crate::error::{AttributionError, Result};
use crate::model::{AggregateEntry, FeatureId, LabelShare, OverlapPass, OverlapRecord};
use crate::utils::round_percentage;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

/// Per-feature aggregate in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateMap {
    entries: Vec<(FeatureId, AggregateEntry)>,
    index: FxHashMap<FeatureId, usize>,
}

impl AggregateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the aggregate for a feature
    pub fn get(&self, feature: FeatureId) -> Option<&AggregateEntry> {
        self.index.get(&feature).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, feature: FeatureId) -> bool {
        self.index.contains_key(&feature)
    }

    /// All entries in the order their features were first seen
    pub fn entries(&self) -> &[(FeatureId, AggregateEntry)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &AggregateEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    fn fold(&mut self, feature: FeatureId, share: LabelShare) {
        match self.index.get(&feature) {
            Some(&pos) => self.entries[pos].1.push(share),
            None => {
                self.index.insert(feature, self.entries.len());
                self.entries.push((feature, AggregateEntry::new(share)));
            }
        }
    }
}

impl FromIterator<(FeatureId, AggregateEntry)> for AggregateMap {
    fn from_iter<T: IntoIterator<Item = (FeatureId, AggregateEntry)>>(iter: T) -> Self {
        let mut map = AggregateMap::new();
        for (feature, entry) in iter {
            match map.index.get(&feature) {
                Some(&pos) => map.entries[pos].1 = entry,
                None => {
                    map.index.insert(feature, map.entries.len());
                    map.entries.push((feature, entry));
                }
            }
        }
        map
    }
}

/// Builds an [`AggregateMap`] pass by pass.
///
/// Passes must be fed in order: the region pass first, then the optional
/// ocean pass. Dominant resolution keeps the earliest label on equal
/// percentages, so feed order decides ties.
#[derive(Debug, Default)]
pub struct OverlapAggregator {
    map: AggregateMap,
    records_seen: usize,
}

impl OverlapAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every record of one measurement pass.
    ///
    /// Returns the number of records folded. The first invalid record aborts
    /// the pass; the aggregator must then be discarded.
    #[instrument(skip(self, records), level = "debug")]
    pub fn ingest<I>(&mut self, pass: OverlapPass, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = OverlapRecord>,
    {
        let mut folded = 0usize;
        for record in records {
            validate(&record)?;
            let share = LabelShare::new(record.label, round_percentage(record.percentage));
            self.map.fold(record.feature, share);
            folded += 1;
        }
        self.records_seen += folded;
        debug!(%pass, folded, features = self.map.len(), "overlap pass folded");
        Ok(folded)
    }

    /// Total records folded across all passes
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    pub fn finish(self) -> AggregateMap {
        self.map
    }
}

fn validate(record: &OverlapRecord) -> Result<()> {
    let reason = if record.label.trim().is_empty() {
        Some("region label is empty")
    } else if !record.percentage.is_finite() {
        Some("percentage is not a finite number")
    } else if !(0.0..=100.0).contains(&record.percentage) {
        Some("percentage outside [0, 100]")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(AttributionError::InvalidRecord {
            feature: record.feature,
            label: record.label.clone(),
            percentage: record.percentage,
            reason,
        }),
        None => Ok(()),
    }
}

/// Aggregate a sequence of measurement passes, in the order given.
pub fn aggregate<P, I>(passes: P) -> Result<AggregateMap>
where
    P: IntoIterator<Item = (OverlapPass, I)>,
    I: IntoIterator<Item = OverlapRecord>,
{
    let mut aggregator = OverlapAggregator::new();
    for (pass, records) in passes {
        aggregator.ingest(pass, records)?;
    }
    Ok(aggregator.finish())
}
