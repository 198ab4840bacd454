use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Normal interval for one population of one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

/// Population-keyed ranges for one test, in resource file order.
///
/// File order matters: the classifier's last-resort fallback picks the first
/// entry, mirroring insertion-ordered maps in the resource format. A plain
/// HashMap here would make that fallback nondeterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationRanges(Vec<(String, ReferenceRange)>);

impl PopulationRanges {
    pub fn get(&self, key: &str) -> Option<&ReferenceRange> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, range)| range)
    }

    pub fn first(&self) -> Option<&ReferenceRange> {
        self.0.first().map(|(_, range)| range)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<(String, ReferenceRange)>) -> Self {
        Self(entries)
    }
}

impl<'de> Deserialize<'de> for PopulationRanges {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangesVisitor;

        impl<'de> Visitor<'de> for RangesVisitor {
            type Value = PopulationRanges;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of population key to reference range")
            }

            // MapAccess yields entries in document order, which is exactly
            // what the fallback cascade needs preserved.
            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, range)) = access.next_entry::<String, ReferenceRange>()? {
                    entries.push((key, range));
                }
                Ok(PopulationRanges(entries))
            }
        }

        deserializer.deserialize_map(RangesVisitor)
    }
}

/// All known reference ranges, keyed by canonical test name.
///
/// Loaded once at startup and read-only afterwards; safe to share by
/// reference across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct RangeCatalogue {
    ranges: HashMap<String, PopulationRanges>,
}

impl RangeCatalogue {
    /// Load the catalogue from a JSON resource.
    ///
    /// A missing or malformed resource degrades to an empty catalogue — every
    /// classification then reports "unknown" — rather than failing startup.
    /// One-time load, no retries.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "reference range resource not found");
                return Self::default();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read reference ranges");
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, PopulationRanges>>(&raw) {
            Ok(ranges) => {
                tracing::info!(count = ranges.len(), "loaded reference ranges");
                Self { ranges }
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "malformed reference range resource");
                Self::default()
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<&PopulationRanges> {
        self.ranges.get(term).filter(|r| !r.is_empty())
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[cfg(test)]
    pub fn from_map(ranges: HashMap<String, PopulationRanges>) -> Self {
        Self { ranges }
    }
}
