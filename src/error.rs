//! Error types for aggregation, partitioning and resolution.

use crate::model::FeatureId;
use thiserror::Error;

/// Errors raised by the attribution core.
///
/// Every variant is fatal to the step that raised it; nothing in the core retries.
#[derive(Debug, Error, PartialEq)]
pub enum AttributionError {
    /// An overlap record with an empty identifier or out of range percentage.
    #[error("invalid overlap record for {feature} ({label:?}, {percentage}): {reason}")]
    InvalidRecord {
        feature: FeatureId,
        label: String,
        percentage: f64,
        reason: &'static str,
    },

    /// Shard count below one.
    #[error("invalid partition: shard count must be at least 1, got {shard_count}")]
    InvalidPartition { shard_count: usize },

    /// A feature reached resolution with no recorded overlaps.
    #[error("feature {feature} has no overlap records to resolve")]
    UnresolvableFeature { feature: FeatureId },

    /// The resolution worker pool could not be started.
    #[error("failed to build resolution worker pool: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, AttributionError>;
