//! # Resolution Driver
//!
//! Runs one attribution pass end to end:
//!
//! ```text
//! overlap passes ──► aggregate ──► partition ──► resolve (worker pool) ──► ordered merge
//! ```
//!
//! Shards are resolved on a fixed-size rayon pool. Results are collected in
//! shard order and merged sequentially, so a feature duplicated on a shard
//! boundary always ends up with the value from the later shard.

use crate::aggregate::{aggregate, AggregateMap};
use crate::config::AttributionConfig;
use crate::error::{AttributionError, Result};
use crate::model::{AssignmentMode, OverlapPass, OverlapRecord, ResolvedLabels};
use crate::partition::{partition, PartitionPolicy, Shard};
use crate::resolver::{BorderResolver, DominantResolver, ResolutionPolicy};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument, warn};

/// Overlap measurements for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlapFeed {
    /// Footprint × country measurements
    pub region: Vec<OverlapRecord>,
    /// Footprint × ocean measurements, only read in dominant-with-ocean mode
    pub ocean: Vec<OverlapRecord>,
}

impl OverlapFeed {
    pub fn new(region: Vec<OverlapRecord>) -> Self {
        Self {
            region,
            ocean: Vec::new(),
        }
    }

    pub fn with_ocean(mut self, ocean: Vec<OverlapRecord>) -> Self {
        self.ocean = ocean;
        self
    }

    /// The passes consumed by a mode, in feed order.
    pub fn passes(self, mode: AssignmentMode) -> Vec<(OverlapPass, Vec<OverlapRecord>)> {
        let mut passes = vec![(OverlapPass::Region, self.region)];
        if mode.uses_ocean_pass() {
            passes.push((OverlapPass::Ocean, self.ocean));
        } else if !self.ocean.is_empty() {
            debug!(%mode, records = self.ocean.len(), "ocean pass ignored");
        }
        passes
    }
}

/// Counters from the last resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub features: usize,
    pub shards: usize,
    /// Features resolved by more than one shard
    pub boundary_duplicates: usize,
}

/// Orchestrates aggregation, partitioning and parallel resolution.
pub struct ResolutionDriver {
    pool: ThreadPool,
    workers: usize,
    shard_count: usize,
    policy: PartitionPolicy,
    parallel_border: bool,
}

impl ResolutionDriver {
    /// Create a driver with its own worker pool.
    pub fn new(config: &AttributionConfig) -> Result<Self> {
        let shard_count = config.effective_shard_count();
        if shard_count < 1 {
            return Err(AttributionError::InvalidPartition { shard_count });
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("terralabel-resolve-{i}"))
            .build()
            .map_err(|e| AttributionError::WorkerPool(e.to_string()))?;

        Ok(Self {
            pool,
            workers: config.workers,
            shard_count,
            policy: config.partition_policy,
            parallel_border: config.parallel_border,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// Aggregate the feed and resolve every overlapping feature.
    #[instrument(skip(self, feed), fields(mode = %mode))]
    pub fn run(&self, feed: OverlapFeed, mode: AssignmentMode) -> Result<ResolvedLabels> {
        info!("Gathering values");
        let map = aggregate(feed.passes(mode))?;
        info!(features = map.len(), "Gathering values completed");

        let (labels, stats) = self.resolve(&map, mode)?;
        info!(
            resolved = labels.len(),
            shards = stats.shards,
            boundary_duplicates = stats.boundary_duplicates,
            "Resolution completed"
        );
        Ok(labels)
    }

    /// Partition an aggregate and resolve its shards.
    #[instrument(skip(self, map), fields(features = map.len()), level = "debug")]
    pub fn resolve(
        &self,
        map: &AggregateMap,
        mode: AssignmentMode,
    ) -> Result<(ResolvedLabels, ResolutionStats)> {
        let shards = partition(map, self.shard_count, self.policy)?;
        info!(shards = shards.len(), "Partitioning completed");

        let results = if mode.is_border() {
            if self.parallel_border {
                self.resolve_parallel(&shards, &BorderResolver)?
            } else {
                resolve_sequential(&shards, &BorderResolver)?
            }
        } else {
            self.resolve_parallel(&shards, &DominantResolver)?
        };

        let resolved_total: usize = results.iter().map(|labels| labels.len()).sum();
        let labels = merge_ordered(results);
        let stats = ResolutionStats {
            features: map.len(),
            shards: shards.len(),
            boundary_duplicates: resolved_total - labels.len(),
        };
        if stats.boundary_duplicates > 0 && self.policy == PartitionPolicy::LegacyOverlap {
            warn!(
                duplicates = stats.boundary_duplicates,
                "boundary features resolved by more than one shard"
            );
        }
        Ok((labels, stats))
    }

    fn resolve_parallel(
        &self,
        shards: &[Shard<'_>],
        policy: &dyn ResolutionPolicy,
    ) -> Result<Vec<ResolvedLabels>> {
        debug!(policy = policy.name(), workers = self.workers, "resolving shards in parallel");
        self.pool
            .install(|| shards.par_iter().map(|shard| policy.resolve_shard(shard)).collect())
    }
}

fn resolve_sequential(
    shards: &[Shard<'_>],
    policy: &dyn ResolutionPolicy,
) -> Result<Vec<ResolvedLabels>> {
    debug!(policy = policy.name(), "resolving shards sequentially");
    shards.iter().map(|shard| policy.resolve_shard(shard)).collect()
}

/// Merge per-shard results in shard order; later shards overwrite earlier ones.
pub fn merge_ordered<I>(results: I) -> ResolvedLabels
where
    I: IntoIterator<Item = ResolvedLabels>,
{
    let mut merged = ResolvedLabels::default();
    for labels in results {
        merged.extend(labels);
    }
    merged
}
