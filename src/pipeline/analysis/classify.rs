use serde::{Deserialize, Serialize};

use super::ranges::{PopulationRanges, RangeCatalogue, ReferenceRange};
use crate::models::Gender;

/// Where a value sits relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Low,
    High,
    Normal,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Low => "low",
            Status::High => "high",
            Status::Normal => "normal",
            Status::Unknown => "unknown",
        }
    }
}

/// Outcome of checking one value against the range catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub is_abnormal: bool,
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<String>,
}

impl Classification {
    fn unknown(term: &str) -> Self {
        Self {
            is_abnormal: false,
            status: Status::Unknown,
            message: format!("Reference range for {term} not available"),
            reference_range: None,
        }
    }
}

/// Classify a test value as low, high or normal for its population.
///
/// `age` is accepted but not consulted yet — reserved for age-banded ranges,
/// threaded through so adding them later does not change the call surface.
pub fn analyze_value(
    catalogue: &RangeCatalogue,
    term: &str,
    value: f64,
    unit: &str,
    age: Option<u32>,
    gender: Option<Gender>,
) -> Classification {
    tracing::debug!(term, value, unit, ?age, ?gender, "classifying value");

    let Some(ranges) = catalogue.get(term) else {
        return Classification::unknown(term);
    };
    let Some(range) = resolve_range(ranges, gender) else {
        return Classification::unknown(term);
    };

    let status = if value < range.min {
        Status::Low
    } else if value > range.max {
        Status::High
    } else {
        Status::Normal
    };

    let message = match status {
        Status::Low => format!(
            "{term} is below normal range (normal: {}-{} {})",
            range.min, range.max, range.unit
        ),
        Status::High => format!(
            "{term} is above normal range (normal: {}-{} {})",
            range.min, range.max, range.unit
        ),
        _ => format!(
            "{term} is within normal range ({}-{} {})",
            range.min, range.max, range.unit
        ),
    };

    Classification {
        is_abnormal: matches!(status, Status::Low | Status::High),
        status,
        message,
        reference_range: Some(format!("{}-{} {}", range.min, range.max, range.unit)),
    }
}

/// Pick the applicable range for a population.
///
/// The cascade order is deliberate and pinned by tests: patient gender,
/// then "default", "all", "female", "male", then whatever entry comes first
/// in the resource file. Reordering it changes classification outcomes for
/// any term with multiple population variants.
fn resolve_range<'a>(
    ranges: &'a PopulationRanges,
    gender: Option<Gender>,
) -> Option<&'a ReferenceRange> {
    gender
        .and_then(|g| ranges.get(g.as_key()))
        .or_else(|| ranges.get("default"))
        .or_else(|| ranges.get("all"))
        .or_else(|| ranges.get("female"))
        .or_else(|| ranges.get("male"))
        .or_else(|| ranges.first())
}
