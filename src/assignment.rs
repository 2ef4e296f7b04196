//! # Assignment
//!
//! Writes resolved labels and their reference attributes back onto footprint
//! records. Storage is abstracted behind [`FootprintSink`]; the crate only
//! ships the in-memory [`MemorySink`].

use crate::model::{FeatureId, ResolvedLabels};
use crate::reference::{ReferenceCatalog, ReferenceMatch};
use anyhow::Result;
use rustc_hash::FxHashMap;
use tracing::{info, instrument};

/// Attribute values written onto one footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureAttribution {
    pub feature: FeatureId,
    /// Country name, ocean name or border label
    pub region: String,
    /// GENC3 for countries, the no-match code otherwise
    pub secondary_code: String,
    /// Responsible area code, the no-match code when unknown
    pub area_code: String,
}

/// Destination of attributions, typically a feature table.
pub trait FootprintSink {
    /// Every footprint in storage order, including ones without overlaps.
    fn feature_ids(&self) -> Vec<FeatureId>;

    /// Persist the attribution of one footprint.
    fn update(&mut self, attribution: FeatureAttribution) -> Result<()>;
}

/// Knobs for the assignment pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSettings {
    /// Log progress every this many footprints (0 disables)
    pub progress_interval: usize,
    /// Code written when a label has no reference entry
    pub no_match: String,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            progress_interval: crate::config::DEFAULT_PROGRESS_INTERVAL,
            no_match: crate::config::DEFAULT_NO_MATCH.to_string(),
        }
    }
}

/// Counters reported by [`assign`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentSummary {
    /// Footprints visited
    pub processed: usize,
    /// Footprints that received a label
    pub updated: usize,
    /// Updated footprints whose label had no reference entry
    pub unmatched: usize,
}

/// Build the attribution for a label.
pub fn attribution_for(
    feature: FeatureId,
    label: &str,
    catalog: &ReferenceCatalog,
    no_match: &str,
) -> FeatureAttribution {
    let (secondary_code, area_code) = match catalog.lookup(label) {
        ReferenceMatch::Country(info) => (info.genc3.clone(), info.aor.clone()),
        ReferenceMatch::Ocean(info) => (no_match.to_string(), info.aor.clone()),
        ReferenceMatch::Unknown => (no_match.to_string(), no_match.to_string()),
    };
    FeatureAttribution {
        feature,
        region: label.to_string(),
        secondary_code,
        area_code,
    }
}

/// Write every resolved label to the sink.
///
/// Footprints without a resolved label are left untouched.
#[instrument(skip_all, fields(labels = labels.len()))]
pub fn assign<S: FootprintSink + ?Sized>(
    sink: &mut S,
    labels: &ResolvedLabels,
    catalog: &ReferenceCatalog,
    settings: &AssignmentSettings,
) -> Result<AssignmentSummary> {
    let features = sink.feature_ids();
    let total = features.len();
    let mut summary = AssignmentSummary::default();

    for feature in features {
        summary.processed += 1;
        if let Some(label) = labels.get(&feature) {
            if catalog.lookup(label) == ReferenceMatch::Unknown {
                summary.unmatched += 1;
            }
            sink.update(attribution_for(feature, label, catalog, &settings.no_match))?;
            summary.updated += 1;
        }
        if settings.progress_interval > 0 && summary.processed % settings.progress_interval == 0 {
            info!("{} out of {} processed", summary.processed, total);
        }
    }

    Ok(summary)
}

/// In-memory footprint table.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    features: Vec<FeatureId>,
    attributions: FxHashMap<FeatureId, FeatureAttribution>,
}

impl MemorySink {
    pub fn new<I: IntoIterator<Item = FeatureId>>(features: I) -> Self {
        Self {
            features: features.into_iter().collect(),
            attributions: FxHashMap::default(),
        }
    }

    pub fn get(&self, feature: FeatureId) -> Option<&FeatureAttribution> {
        self.attributions.get(&feature)
    }

    pub fn attributed_count(&self) -> usize {
        self.attributions.len()
    }
}

impl FootprintSink for MemorySink {
    fn feature_ids(&self) -> Vec<FeatureId> {
        self.features.clone()
    }

    fn update(&mut self, attribution: FeatureAttribution) -> Result<()> {
        self.attributions.insert(attribution.feature, attribution);
        Ok(())
    }
}
