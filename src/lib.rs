//! # Terralabel
//!
//! Attributes a dominant region label (country, ocean or border designation)
//! to spatial footprints from the share of each footprint that overlaps a set
//! of labeled reference polygons.
//!
//! Overlap measurements are produced elsewhere; this crate aggregates them
//! per footprint, partitions the aggregate, resolves every shard on a worker
//! pool and merges the results into one label per footprint.

pub mod aggregate;
pub mod assignment;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod partition;
pub mod reference;
pub mod resolver;
pub mod utils;

// Re-export main types for convenience
pub use aggregate::{aggregate, AggregateMap, OverlapAggregator};
pub use assignment::{AssignmentSummary, FeatureAttribution, FootprintSink, MemorySink};
pub use config::{AttributionConfig, ConfigOverrides};
pub use driver::{OverlapFeed, ResolutionDriver};
pub use error::AttributionError;
pub use model::{AggregateEntry, AssignmentMode, FeatureId, OverlapRecord, ResolvedLabels};
pub use partition::{partition, PartitionPolicy, Shard};
pub use reference::ReferenceCatalog;
pub use resolver::{resolve_border, resolve_dominant};

use tracing::info;

/// Outcome of a full attribution run.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionReport {
    pub labels: ResolvedLabels,
    pub assignment: AssignmentSummary,
}

/// Main API for footprint attribution
pub struct Terralabel {
    config: AttributionConfig,
    catalog: ReferenceCatalog,
    driver: ResolutionDriver,
}

impl Terralabel {
    /// Create an instance with a reference catalog.
    pub fn new(config: AttributionConfig, catalog: ReferenceCatalog) -> anyhow::Result<Self> {
        config.validate()?;
        let driver = ResolutionDriver::new(&config)?;
        info!(
            countries = catalog.country_count(),
            oceans = catalog.ocean_count(),
            "Reference catalog loaded"
        );
        Ok(Self {
            config,
            catalog,
            driver,
        })
    }

    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Resolve labels with the configured mode.
    pub fn resolve(&self, feed: OverlapFeed) -> anyhow::Result<ResolvedLabels> {
        Ok(self.driver.run(feed, self.config.mode)?)
    }

    /// Resolve labels with an explicit mode.
    pub fn resolve_with_mode(
        &self,
        feed: OverlapFeed,
        mode: AssignmentMode,
    ) -> anyhow::Result<ResolvedLabels> {
        Ok(self.driver.run(feed, mode)?)
    }

    /// Resolve labels and write them to a footprint sink.
    pub fn attribute<S: FootprintSink + ?Sized>(
        &self,
        feed: OverlapFeed,
        sink: &mut S,
    ) -> anyhow::Result<AttributionReport> {
        let labels = self.resolve(feed)?;

        info!("Assigning values");
        let assignment = assignment::assign(
            sink,
            &labels,
            &self.catalog,
            &self.config.assignment_settings(),
        )?;
        info!(
            processed = assignment.processed,
            updated = assignment.updated,
            "Assigning values completed"
        );

        Ok(AttributionReport { labels, assignment })
    }
}
