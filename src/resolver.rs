//! # Label Resolution
//!
//! Turns per-feature aggregates into a single label. Two policies exist:
//! the dominant policy keeps the region with the largest overlap, the border
//! policy names features that straddle regions after the two leading regions.
//!
//! Both policies compare with strict greater-than, so on equal percentages the
//! earliest share in the aggregate keeps the lead.

use crate::error::{AttributionError, Result};
use crate::model::{AggregateEntry, FeatureId, LabelShare, ResolvedLabels};
use crate::partition::Shard;
use crate::utils::border_label;
use rustc_hash::FxHashMap;
use tracing::instrument;

/// A rule that picks the final label of one feature from its aggregate.
pub trait ResolutionPolicy: Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Resolve a single aggregate entry.
    fn resolve_entry(&self, entry: &AggregateEntry) -> Option<String>;

    /// Resolve every feature of a shard.
    fn resolve_shard(&self, shard: &Shard<'_>) -> Result<ResolvedLabels> {
        let mut resolved = FxHashMap::with_capacity_and_hasher(shard.len(), Default::default());
        for (feature, entry) in shard.iter() {
            let label = self
                .resolve_entry(entry)
                .ok_or(AttributionError::UnresolvableFeature { feature })?;
            resolved.insert(feature, label);
        }
        Ok(resolved)
    }
}

/// Picks the region with the highest overlap percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DominantResolver;

impl ResolutionPolicy for DominantResolver {
    fn name(&self) -> &'static str {
        "dominant"
    }

    fn resolve_entry(&self, entry: &AggregateEntry) -> Option<String> {
        let first = entry.intersect.first()?;
        if entry.count == 0 {
            return None;
        }
        if entry.count == 1 {
            return Some(first.label.clone());
        }
        let (leader, _) = leaders(&entry.intersect);
        Some(leader.unwrap_or(first).label.clone())
    }
}

/// Names features that touch several regions as a border between the two leaders.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderResolver;

impl ResolutionPolicy for BorderResolver {
    fn name(&self) -> &'static str {
        "border"
    }

    fn resolve_entry(&self, entry: &AggregateEntry) -> Option<String> {
        let first = entry.intersect.first()?;
        match entry.count {
            0 => None,
            1 => Some(first.label.clone()),
            2 => {
                let second = entry.intersect.get(1)?;
                Some(border_label(&first.label, &second.label))
            }
            _ => {
                let (leader, runner_up) = leaders(&entry.intersect);
                let leader = leader.unwrap_or(first);
                let runner_up = runner_up.map(|share| share.label.as_str()).unwrap_or("");
                Some(border_label(&leader.label, runner_up))
            }
        }
    }
}

/// Single pass over the shares keeping the two largest percentages.
///
/// A new leader demotes the old one to runner-up. Anything that beats the
/// runner-up without beating the leader replaces the runner-up. Percentages
/// of zero never lead.
fn leaders(shares: &[LabelShare]) -> (Option<&LabelShare>, Option<&LabelShare>) {
    let mut highest = 0.0;
    let mut second = 0.0;
    let mut leader: Option<&LabelShare> = None;
    let mut runner_up: Option<&LabelShare> = None;

    for share in shares {
        if share.percentage > highest {
            second = highest;
            runner_up = leader;
            highest = share.percentage;
            leader = Some(share);
        } else if share.percentage > second {
            second = share.percentage;
            runner_up = Some(share);
        }
    }
    (leader, runner_up)
}

/// Resolve a shard with the dominant policy.
#[instrument(skip(shard), fields(shard = shard.index, features = shard.len()), level = "debug")]
pub fn resolve_dominant(shard: &Shard<'_>) -> Result<ResolvedLabels> {
    DominantResolver.resolve_shard(shard)
}

/// Resolve a shard with the border policy.
#[instrument(skip(shard), fields(shard = shard.index, features = shard.len()), level = "debug")]
pub fn resolve_border(shard: &Shard<'_>) -> Result<ResolvedLabels> {
    BorderResolver.resolve_shard(shard)
}

/// Resolve one feature's aggregate outside of a shard.
pub fn resolve_feature<P: ResolutionPolicy + ?Sized>(
    policy: &P,
    feature: FeatureId,
    entry: &AggregateEntry,
) -> Result<String> {
    policy
        .resolve_entry(entry)
        .ok_or(AttributionError::UnresolvableFeature { feature })
}
