//! # Reference Catalog
//!
//! Read-only lookups from region label to the secondary attributes written
//! next to the label: GENC trigraph and area of responsibility for countries,
//! area of responsibility for oceans and seas.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Secondary attributes of a country polygon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// GENC three letter country code
    pub genc3: String,
    /// Responsible area code
    pub aor: String,
}

/// Secondary attributes of an ocean or sea polygon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OceanInfo {
    /// Responsible area code
    pub aor: String,
}

/// Attributes resolved for a label, before fallbacks are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMatch<'a> {
    Country(&'a CountryInfo),
    Ocean(&'a OceanInfo),
    Unknown,
}

/// Country and ocean lookup tables, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    countries: FxHashMap<String, CountryInfo>,
    oceans: FxHashMap<String, OceanInfo>,
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load country rows `(name, genc3, aor)`. The first row for a name wins.
    pub fn with_countries<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        for (name, genc3, aor) in rows {
            self.countries.entry(name.into()).or_insert_with(|| CountryInfo {
                genc3: genc3.into(),
                aor: aor.into(),
            });
        }
        self
    }

    /// Load ocean rows `(name, aor)`. The first row for a name wins.
    pub fn with_oceans<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        for (name, aor) in rows {
            self.oceans
                .entry(name.into())
                .or_insert_with(|| OceanInfo { aor: aor.into() });
        }
        self
    }

    pub fn country(&self, label: &str) -> Option<&CountryInfo> {
        self.countries.get(label)
    }

    pub fn ocean(&self, label: &str) -> Option<&OceanInfo> {
        self.oceans.get(label)
    }

    /// Look a label up, countries first.
    pub fn lookup(&self, label: &str) -> ReferenceMatch<'_> {
        if let Some(info) = self.countries.get(label) {
            ReferenceMatch::Country(info)
        } else if let Some(info) = self.oceans.get(label) {
            ReferenceMatch::Ocean(info)
        } else {
            ReferenceMatch::Unknown
        }
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn ocean_count(&self) -> usize {
        self.oceans.len()
    }
}
