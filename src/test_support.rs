use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use terralabel::{FeatureId, OverlapFeed, OverlapRecord, ReferenceCatalog};

pub const COUNTRIES: [(&str, &str, &str); 8] = [
    ("United States", "USA", "NORTHCOM"),
    ("Mexico", "MEX", "NORTHCOM"),
    ("Canada", "CAN", "NORTHCOM"),
    ("Guatemala", "GTM", "SOUTHCOM"),
    ("Belize", "BLZ", "SOUTHCOM"),
    ("Côte d'Ivoire", "CIV", "AFRICOM"),
    ("Ghana", "GHA", "AFRICOM"),
    ("Österreich", "AUT", "EUCOM"),
];

pub const OCEANS: [(&str, &str); 3] = [
    ("Gulf of Mexico", "NORTHCOM"),
    ("North Pacific Ocean", "INDOPACOM"),
    ("Gulf of Guinea", "AFRICOM"),
];

#[derive(Debug, Clone)]
pub struct GeneratedFeed {
    pub feed: OverlapFeed,
    /// Every footprint, including ones with no overlap at all
    #[allow(dead_code)]
    pub features: Vec<FeatureId>,
}

/// Synthetic overlap feed.
///
/// Footprints `1..=count` are generated; roughly one in ten has no overlap.
/// Region shares of a footprint sum to at most 100.
pub fn generate_feed(
    count: u32,
    straddle_probability: f64,
    ocean_probability: f64,
    seed: u64,
) -> GeneratedFeed {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut region = Vec::new();
    let mut ocean = Vec::new();
    let mut features = Vec::with_capacity(count as usize);

    for i in 1..=count {
        let feature = FeatureId(i);
        features.push(feature);
        if rng.random_bool(0.1) {
            continue;
        }

        let overlaps = if rng.random_bool(straddle_probability) {
            rng.random_range(2..=4)
        } else {
            1
        };
        let mut remaining = 100.0f64;
        let picks = index::sample(&mut rng, COUNTRIES.len(), overlaps);
        for (n, pick) in picks.into_iter().enumerate() {
            let (name, _, _) = COUNTRIES[pick];
            let share = if n + 1 == overlaps || remaining <= f64::EPSILON {
                remaining
            } else {
                rng.random_range(0.0..remaining)
            };
            remaining -= share;
            region.push(OverlapRecord::new(i, name, share));
        }

        if rng.random_bool(ocean_probability) {
            let (name, _) = OCEANS[rng.random_range(0..OCEANS.len())];
            ocean.push(OverlapRecord::new(i, name, rng.random_range(0.0..=100.0)));
        }
    }

    GeneratedFeed {
        feed: OverlapFeed::new(region).with_ocean(ocean),
        features,
    }
}

#[allow(dead_code)]
pub fn default_catalog() -> ReferenceCatalog {
    ReferenceCatalog::new()
        .with_countries(COUNTRIES)
        .with_oceans(OCEANS)
}
