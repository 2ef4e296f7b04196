//! # Data Model
//!
//! Core data structures for overlap attribution: feature identifiers, raw
//! overlap measurements, per-feature aggregates and the resolved label map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact identifier for footprint records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub u32);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl From<u32> for FeatureId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Which measurement pass produced a batch of overlap records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPass {
    /// Footprints intersected with country polygons
    Region,
    /// Footprints intersected with ocean and sea polygons
    Ocean,
}

impl fmt::Display for OverlapPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPass::Region => write!(f, "region"),
            OverlapPass::Ocean => write!(f, "ocean"),
        }
    }
}

/// A single overlap measurement between a footprint and a labeled region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapRecord {
    /// The footprint that was measured
    pub feature: FeatureId,
    /// Country, ocean or sea name of the reference polygon
    pub label: String,
    /// Share of the footprint area inside the region, 0 to 100
    pub percentage: f64,
}

impl OverlapRecord {
    /// Create a new overlap record
    pub fn new(feature: u32, label: impl Into<String>, percentage: f64) -> Self {
        Self {
            feature: FeatureId(feature),
            label: label.into(),
            percentage,
        }
    }
}

/// One (label, percentage) pair inside an aggregate, percentage already rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub label: String,
    pub percentage: f64,
}

impl LabelShare {
    pub fn new(label: impl Into<String>, percentage: f64) -> Self {
        Self {
            label: label.into(),
            percentage,
        }
    }
}

/// Accumulated overlap state for one feature.
///
/// `intersect` keeps arrival order: every record of the first pass precedes
/// every record of the second pass. `intersect.len() == count` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub count: usize,
    pub intersect: Vec<LabelShare>,
}

impl AggregateEntry {
    /// Start an aggregate from its first share
    pub fn new(share: LabelShare) -> Self {
        Self {
            count: 1,
            intersect: vec![share],
        }
    }

    /// Fold another share into the aggregate
    pub fn push(&mut self, share: LabelShare) {
        self.count += 1;
        self.intersect.push(share);
    }

    /// Whether the count and the recorded shares agree
    pub fn is_consistent(&self) -> bool {
        self.count == self.intersect.len()
    }
}

/// Final label per feature, the sole output of a resolution run.
pub type ResolvedLabels = FxHashMap<FeatureId, String>;

/// How the final label of a feature is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentMode {
    /// Region pass only, dominant label wins
    #[default]
    Dominant,
    /// Region and ocean passes, dominant label wins
    DominantWithOcean,
    /// Region pass only, straddling features get a border label
    Border,
}

impl AssignmentMode {
    /// Whether the ocean measurement pass is consumed in this mode
    pub fn uses_ocean_pass(self) -> bool {
        matches!(self, AssignmentMode::DominantWithOcean)
    }

    /// Whether border labels are synthesized in this mode
    pub fn is_border(self) -> bool {
        matches!(self, AssignmentMode::Border)
    }
}

impl fmt::Display for AssignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentMode::Dominant => write!(f, "dominant"),
            AssignmentMode::DominantWithOcean => write!(f, "dominant-with-ocean"),
            AssignmentMode::Border => write!(f, "border"),
        }
    }
}
