//! Default constants for terralabel configuration.
//!
//! All magic numbers are centralized here with documentation.

// =============================================================================
// Worker Pool Defaults
// =============================================================================

/// Default number of resolution workers.
/// Also the default shard count, one shard per worker.
pub const DEFAULT_WORKERS: usize = 2;

/// Upper bound on the worker pool size.
pub const MAX_WORKERS: usize = 512;

/// Worker count matching the machine, for callers that want to opt in.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(DEFAULT_WORKERS)
}

// =============================================================================
// Assignment Defaults
// =============================================================================

/// Footprints between two progress log lines during assignment
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Code written when a label has no reference entry
pub const DEFAULT_NO_MATCH: &str = "N/A";

// =============================================================================
// Environment
// =============================================================================

/// Prefix of environment variables read by [`super::AttributionConfig::load`]
pub const ENV_PREFIX: &str = "TERRALABEL_";
